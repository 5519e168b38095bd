//! Static datapoint type registry.
//!
//! The table is a `match` over main types; nothing is initialised at
//! runtime.
//!
//! ```
//! use knx_ip_core::dpt::{registry, DatapointType};
//!
//! assert_eq!(registry::type_size(19), Some(8));
//! assert!(registry::sub_types(5).contains(&1));
//!
//! let dp = registry::create(232, 600).unwrap();
//! assert_eq!(dp.id().to_string(), "DPST-232-600");
//! assert!(registry::create(232, 601).is_none());
//! ```

use super::{
    ColourRgb, Datapoint, DatapointKind, Date, DateTime, Dpt1, Dpt10, Dpt11, Dpt13, Dpt15, Dpt19,
    Dpt2, Dpt21, Dpt232, Dpt3, Dpt5, Dpt6, Dpt7, Dpt9, DptId, EightBitSet, EightBitSigned,
    EightBitUnsigned, EntranceAccess, FourByteSigned, OneBit, OneBitControlled, ThreeBitControlled,
    TimeOfDay, TwoByteFloat, TwoByteUnsigned,
};

const MAIN_TYPES: &[u16] = &[1, 2, 3, 5, 6, 7, 9, 10, 11, 13, 15, 19, 21, 232];

/// Registered main types, ascending.
pub fn main_types() -> &'static [u16] {
    MAIN_TYPES
}

/// Whether `main` is registered.
pub fn contains_main_type(main: u16) -> bool {
    MAIN_TYPES.contains(&main)
}

/// Registered subtypes of `main`, empty for an unknown main type.
pub fn sub_types(main: u16) -> &'static [u16] {
    match main {
        1 => Dpt1::SUBTYPES,
        2 => Dpt2::SUBTYPES,
        3 => Dpt3::SUBTYPES,
        5 => Dpt5::SUBTYPES,
        6 => Dpt6::SUBTYPES,
        7 => Dpt7::SUBTYPES,
        9 => Dpt9::SUBTYPES,
        10 => Dpt10::SUBTYPES,
        11 => Dpt11::SUBTYPES,
        13 => Dpt13::SUBTYPES,
        15 => Dpt15::SUBTYPES,
        19 => Dpt19::SUBTYPES,
        21 => Dpt21::SUBTYPES,
        232 => Dpt232::SUBTYPES,
        _ => &[],
    }
}

/// Whether `(main, sub)` is registered.
pub fn contains_sub_type(main: u16, sub: u16) -> bool {
    sub_types(main).contains(&sub)
}

/// Size in octets of every type in `main`.
pub fn type_size(main: u16) -> Option<usize> {
    let size = match main {
        1 => OneBit::SIZE,
        2 => OneBitControlled::SIZE,
        3 => ThreeBitControlled::SIZE,
        5 => EightBitUnsigned::SIZE,
        6 => EightBitSigned::SIZE,
        7 => TwoByteUnsigned::SIZE,
        9 => TwoByteFloat::SIZE,
        10 => TimeOfDay::SIZE,
        11 => Date::SIZE,
        13 => FourByteSigned::SIZE,
        15 => EntranceAccess::SIZE,
        19 => DateTime::SIZE,
        21 => EightBitSet::SIZE,
        232 => ColourRgb::SIZE,
        _ => return None,
    };
    Some(size)
}

/// Resolve `(main, sub)` to a symbolic kind.
pub fn kind(main: u16, sub: u16) -> Option<DatapointKind> {
    let kind = match main {
        1 => DatapointKind::OneBit(Dpt1::from_sub(sub)?),
        2 => DatapointKind::OneBitControlled(Dpt2::from_sub(sub)?),
        3 => DatapointKind::ThreeBitControlled(Dpt3::from_sub(sub)?),
        5 => DatapointKind::EightBitUnsigned(Dpt5::from_sub(sub)?),
        6 => DatapointKind::EightBitSigned(Dpt6::from_sub(sub)?),
        7 => DatapointKind::TwoByteUnsigned(Dpt7::from_sub(sub)?),
        9 => DatapointKind::TwoByteFloat(Dpt9::from_sub(sub)?),
        10 => DatapointKind::TimeOfDay(Dpt10::from_sub(sub)?),
        11 => DatapointKind::Date(Dpt11::from_sub(sub)?),
        13 => DatapointKind::FourByteSigned(Dpt13::from_sub(sub)?),
        15 => DatapointKind::EntranceAccess(Dpt15::from_sub(sub)?),
        19 => DatapointKind::DateTime(Dpt19::from_sub(sub)?),
        21 => DatapointKind::EightBitSet(Dpt21::from_sub(sub)?),
        232 => DatapointKind::ColourRgb(Dpt232::from_sub(sub)?),
        _ => return None,
    };
    Some(kind)
}

/// Create a default value for `(main, sub)`. Subtype 0 is the generic type.
pub fn create(main: u16, sub: u16) -> Option<Datapoint> {
    kind(main, sub).map(create_by_enum)
}

/// Create a default value for a symbolic kind.
pub fn create_by_enum(kind: DatapointKind) -> Datapoint {
    match kind {
        DatapointKind::OneBit(s) => Datapoint::OneBit(OneBit::new(s)),
        DatapointKind::OneBitControlled(s) => Datapoint::OneBitControlled(OneBitControlled::new(s)),
        DatapointKind::ThreeBitControlled(s) => {
            Datapoint::ThreeBitControlled(ThreeBitControlled::new(s))
        }
        DatapointKind::EightBitUnsigned(s) => Datapoint::EightBitUnsigned(EightBitUnsigned::new(s)),
        DatapointKind::EightBitSigned(s) => Datapoint::EightBitSigned(EightBitSigned::new(s)),
        DatapointKind::TwoByteUnsigned(s) => Datapoint::TwoByteUnsigned(TwoByteUnsigned::new(s)),
        DatapointKind::TwoByteFloat(s) => Datapoint::TwoByteFloat(TwoByteFloat::new(s)),
        DatapointKind::TimeOfDay(s) => Datapoint::TimeOfDay(TimeOfDay::new(s)),
        DatapointKind::Date(s) => Datapoint::Date(Date::new(s)),
        DatapointKind::FourByteSigned(s) => Datapoint::FourByteSigned(FourByteSigned::new(s)),
        DatapointKind::EntranceAccess(s) => Datapoint::EntranceAccess(EntranceAccess::new(s)),
        DatapointKind::DateTime(s) => Datapoint::DateTime(DateTime::new(s)),
        DatapointKind::EightBitSet(s) => Datapoint::EightBitSet(EightBitSet::new(s)),
        DatapointKind::ColourRgb(s) => Datapoint::ColourRgb(ColourRgb::new(s)),
    }
}

/// Create a default value for an identifier. `DPT-<main>` yields the
/// generic subtype.
pub fn create_by_id(id: &DptId) -> Option<Datapoint> {
    create(id.main, id.sub.unwrap_or(0))
}
