//! KNX Datapoint Types (DPT)
//!
//! A datapoint type fixes how the payload of a group telegram is read: its
//! size in octets, the bit layout, the value range and a unit. Types are
//! grouped in main-type families (`DPT-9`) and refined by subtypes
//! (`DPST-9-1`, temperature in °C).
//!
//! ## Supported families
//!
//! | Main | Value struct | Size |
//! |------|--------------|------|
//! | 1 | [`OneBit`] | 1 |
//! | 2 | [`OneBitControlled`] | 1 |
//! | 3 | [`ThreeBitControlled`] | 1 |
//! | 5 | [`EightBitUnsigned`] | 1 |
//! | 6 | [`EightBitSigned`] | 1 |
//! | 7 | [`TwoByteUnsigned`] | 2 |
//! | 9 | [`TwoByteFloat`] | 2 |
//! | 10 | [`TimeOfDay`] | 3 |
//! | 11 | [`Date`] | 3 |
//! | 13 | [`FourByteSigned`] | 4 |
//! | 15 | [`EntranceAccess`] | 4 |
//! | 19 | [`DateTime`] | 8 |
//! | 21 | [`EightBitSet`] | 1 |
//! | 232 | [`ColourRgb`] | 3 |
//!
//! Every value struct owns exactly `size` octets. Setters return `false`
//! and leave the octets untouched when the value is out of range; octets
//! read off the wire are checked with [`DatapointType::is_valid`].
//!
//! ## Usage
//!
//! ```rust
//! use knx_ip_core::dpt::{registry, Datapoint, DatapointType, DptId};
//!
//! let id: DptId = "DPST-9-1".parse().unwrap();
//! let Some(Datapoint::TwoByteFloat(mut temp)) = registry::create_by_id(&id) else {
//!     panic!("temperature is registered");
//! };
//! assert!(temp.set_value(21.5));
//! assert_eq!(temp.bytes(), &[0x0C, 0x33]);
//! assert_eq!(temp.unit(), "°C");
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::{KnxError, Result};

/// Declares a subtype enum with its registry number, description, unit and
/// range text.
macro_rules! dpt_subtypes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $sub:literal =>
                    ($desc:literal, $unit:literal, $min:literal, $max:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every subtype, generic first.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Registered subtype numbers, in the order of `ALL`.
            pub const SUBTYPES: &'static [u16] = &[$($sub),+];

            /// Look up a subtype by number.
            pub const fn from_sub(sub: u16) -> Option<Self> {
                match sub {
                    $($sub => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Subtype number (0 for the generic type).
            pub const fn sub(self) -> u16 {
                match self {
                    $(Self::$variant => $sub,)+
                }
            }

            /// Human readable description.
            pub const fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)+
                }
            }

            /// Unit text, empty when dimensionless.
            pub const fn unit(self) -> &'static str {
                match self {
                    $(Self::$variant => $unit,)+
                }
            }

            /// Lower and upper range text.
            pub const fn range_text(self) -> (&'static str, &'static str) {
                match self {
                    $(Self::$variant => ($min, $max),)+
                }
            }
        }
    };
}

/// Implements [`DatapointType`] for a value struct holding `subtype` and
/// `data: [u8; SIZE]` with a private `check()` validator.
macro_rules! impl_datapoint_type {
    ($ty:ty, $main:literal, $size:literal) => {
        impl $ty {
            /// Main type number.
            pub const MAIN: u16 = $main;
            /// Size in octets.
            pub const SIZE: usize = $size;
        }

        impl $crate::dpt::DatapointType for $ty {
            fn id(&self) -> $crate::dpt::DptId {
                $crate::dpt::DptId::from_parts($main, self.subtype.sub())
            }

            fn size(&self) -> usize {
                $size
            }

            fn bytes(&self) -> &[u8] {
                &self.data
            }

            fn set_bytes(&mut self, bytes: &[u8]) -> bool {
                match <[u8; $size]>::try_from(bytes) {
                    Ok(data) => {
                        self.data = data;
                        self.check()
                    }
                    Err(_) => false,
                }
            }

            fn is_valid(&self) -> bool {
                self.check()
            }

            fn description(&self) -> &'static str {
                self.subtype.description()
            }

            fn unit(&self) -> &'static str {
                self.subtype.unit()
            }

            fn range_text(&self) -> (&'static str, &'static str) {
                self.subtype.range_text()
            }
        }
    };
}

pub mod dpt1;
pub mod dpt2;
pub mod dpt3;
pub mod dpt5;
pub mod dpt6;
pub mod dpt7;
pub mod dpt9;
pub mod dpt10;
pub mod dpt11;
pub mod dpt13;
pub mod dpt15;
pub mod dpt19;
pub mod dpt21;
pub mod dpt232;
pub mod registry;

#[doc(inline)]
pub use dpt1::{Dpt1, OneBit};
#[doc(inline)]
pub use dpt2::{Dpt2, OneBitControlled};
#[doc(inline)]
pub use dpt3::{Dpt3, StepCode, ThreeBitControlled};
#[doc(inline)]
pub use dpt5::{Dpt5, EightBitUnsigned};
#[doc(inline)]
pub use dpt6::{Dpt6, EightBitSigned};
#[doc(inline)]
pub use dpt7::{Dpt7, TwoByteUnsigned};
#[doc(inline)]
pub use dpt9::{Dpt9, TwoByteFloat};
#[doc(inline)]
pub use dpt10::{DayOfWeek, Dpt10, TimeOfDay};
#[doc(inline)]
pub use dpt11::{Date, Dpt11};
#[doc(inline)]
pub use dpt13::{Dpt13, FourByteSigned};
#[doc(inline)]
pub use dpt15::{Dpt15, EntranceAccess, EntranceAttributes};
#[doc(inline)]
pub use dpt19::{ClockQuality, DateTime, DateTimeFlags, Dpt19};
#[doc(inline)]
pub use dpt21::{DeviceControl, Dpt21, EightBitSet, GeneralStatus};
#[doc(inline)]
pub use dpt232::{ColourRgb, Dpt232};

/// Common behaviour of every datapoint type value.
pub trait DatapointType {
    /// Identifier, `DPT-<main>` for generic types, `DPST-<main>-<sub>` otherwise.
    fn id(&self) -> DptId;

    /// Size in octets.
    fn size(&self) -> usize;

    /// Current octets.
    fn bytes(&self) -> &[u8];

    /// Replace the octets.
    ///
    /// A slice of the wrong length is rejected and leaves the value
    /// untouched. Otherwise the octets are stored and the result is
    /// [`is_valid`](Self::is_valid) for the new content.
    fn set_bytes(&mut self, bytes: &[u8]) -> bool;

    /// Whether the octets hold a value allowed by the subtype.
    fn is_valid(&self) -> bool;

    /// Human readable description.
    fn description(&self) -> &'static str;

    /// Unit text, empty when dimensionless.
    fn unit(&self) -> &'static str;

    /// Lower and upper range text.
    fn range_text(&self) -> (&'static str, &'static str);
}

/// Datapoint type identifier.
///
/// ```
/// use knx_ip_core::DptId;
///
/// let id: DptId = "DPST-5-1".parse().unwrap();
/// assert_eq!((id.main, id.sub), (5, Some(1)));
/// assert_eq!(id.to_string(), "DPST-5-1");
/// assert_eq!(DptId::main_type(9).to_string(), "DPT-9");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DptId {
    /// Main type number
    pub main: u16,
    /// Subtype number, `None` for a main type identifier
    pub sub: Option<u16>,
}

impl DptId {
    /// Identifier of a whole family.
    pub const fn main_type(main: u16) -> Self {
        Self { main, sub: None }
    }

    /// Identifier of a subtype.
    pub const fn sub_type(main: u16, sub: u16) -> Self {
        Self { main, sub: Some(sub) }
    }

    /// Subtype 0 maps to the family identifier.
    pub const fn from_parts(main: u16, sub: u16) -> Self {
        if sub == 0 {
            Self::main_type(main)
        } else {
            Self::sub_type(main, sub)
        }
    }
}

impl fmt::Display for DptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub {
            Some(sub) => write!(f, "DPST-{}-{}", self.main, sub),
            None => write!(f, "DPT-{}", self.main),
        }
    }
}

impl FromStr for DptId {
    type Err = KnxError;

    fn from_str(s: &str) -> Result<Self> {
        let number = |text: &str| -> Result<u16> {
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(KnxError::invalid_dpt_identifier());
            }
            text.parse().map_err(|_err| KnxError::invalid_dpt_identifier())
        };

        if let Some(rest) = s.strip_prefix("DPST-") {
            let (main, sub) = rest.split_once('-').ok_or_else(KnxError::invalid_dpt_identifier)?;
            Ok(Self::sub_type(number(main)?, number(sub)?))
        } else if let Some(rest) = s.strip_prefix("DPT-") {
            Ok(Self::main_type(number(rest)?))
        } else {
            Err(KnxError::invalid_dpt_identifier())
        }
    }
}

/// Symbolic datapoint type: a family together with its subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs, reason = "variants mirror the value structs")]
pub enum DatapointKind {
    OneBit(Dpt1),
    OneBitControlled(Dpt2),
    ThreeBitControlled(Dpt3),
    EightBitUnsigned(Dpt5),
    EightBitSigned(Dpt6),
    TwoByteUnsigned(Dpt7),
    TwoByteFloat(Dpt9),
    TimeOfDay(Dpt10),
    Date(Dpt11),
    FourByteSigned(Dpt13),
    EntranceAccess(Dpt15),
    DateTime(Dpt19),
    EightBitSet(Dpt21),
    ColourRgb(Dpt232),
}

impl DatapointKind {
    /// Identifier of this kind.
    pub const fn id(self) -> DptId {
        let (main, sub) = match self {
            Self::OneBit(s) => (OneBit::MAIN, s.sub()),
            Self::OneBitControlled(s) => (OneBitControlled::MAIN, s.sub()),
            Self::ThreeBitControlled(s) => (ThreeBitControlled::MAIN, s.sub()),
            Self::EightBitUnsigned(s) => (EightBitUnsigned::MAIN, s.sub()),
            Self::EightBitSigned(s) => (EightBitSigned::MAIN, s.sub()),
            Self::TwoByteUnsigned(s) => (TwoByteUnsigned::MAIN, s.sub()),
            Self::TwoByteFloat(s) => (TwoByteFloat::MAIN, s.sub()),
            Self::TimeOfDay(s) => (TimeOfDay::MAIN, s.sub()),
            Self::Date(s) => (Date::MAIN, s.sub()),
            Self::FourByteSigned(s) => (FourByteSigned::MAIN, s.sub()),
            Self::EntranceAccess(s) => (EntranceAccess::MAIN, s.sub()),
            Self::DateTime(s) => (DateTime::MAIN, s.sub()),
            Self::EightBitSet(s) => (EightBitSet::MAIN, s.sub()),
            Self::ColourRgb(s) => (ColourRgb::MAIN, s.sub()),
        };
        DptId::from_parts(main, sub)
    }
}

/// Any registered datapoint type value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs, reason = "variants mirror the value structs")]
pub enum Datapoint {
    OneBit(OneBit),
    OneBitControlled(OneBitControlled),
    ThreeBitControlled(ThreeBitControlled),
    EightBitUnsigned(EightBitUnsigned),
    EightBitSigned(EightBitSigned),
    TwoByteUnsigned(TwoByteUnsigned),
    TwoByteFloat(TwoByteFloat),
    TimeOfDay(TimeOfDay),
    Date(Date),
    FourByteSigned(FourByteSigned),
    EntranceAccess(EntranceAccess),
    DateTime(DateTime),
    EightBitSet(EightBitSet),
    ColourRgb(ColourRgb),
}

macro_rules! each_datapoint {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Datapoint::OneBit($inner) => $body,
            Datapoint::OneBitControlled($inner) => $body,
            Datapoint::ThreeBitControlled($inner) => $body,
            Datapoint::EightBitUnsigned($inner) => $body,
            Datapoint::EightBitSigned($inner) => $body,
            Datapoint::TwoByteUnsigned($inner) => $body,
            Datapoint::TwoByteFloat($inner) => $body,
            Datapoint::TimeOfDay($inner) => $body,
            Datapoint::Date($inner) => $body,
            Datapoint::FourByteSigned($inner) => $body,
            Datapoint::EntranceAccess($inner) => $body,
            Datapoint::DateTime($inner) => $body,
            Datapoint::EightBitSet($inner) => $body,
            Datapoint::ColourRgb($inner) => $body,
        }
    };
}

impl Datapoint {
    /// Symbolic kind of this value.
    pub fn kind(&self) -> DatapointKind {
        match self {
            Self::OneBit(v) => DatapointKind::OneBit(v.subtype()),
            Self::OneBitControlled(v) => DatapointKind::OneBitControlled(v.subtype()),
            Self::ThreeBitControlled(v) => DatapointKind::ThreeBitControlled(v.subtype()),
            Self::EightBitUnsigned(v) => DatapointKind::EightBitUnsigned(v.subtype()),
            Self::EightBitSigned(v) => DatapointKind::EightBitSigned(v.subtype()),
            Self::TwoByteUnsigned(v) => DatapointKind::TwoByteUnsigned(v.subtype()),
            Self::TwoByteFloat(v) => DatapointKind::TwoByteFloat(v.subtype()),
            Self::TimeOfDay(v) => DatapointKind::TimeOfDay(v.subtype()),
            Self::Date(v) => DatapointKind::Date(v.subtype()),
            Self::FourByteSigned(v) => DatapointKind::FourByteSigned(v.subtype()),
            Self::EntranceAccess(v) => DatapointKind::EntranceAccess(v.subtype()),
            Self::DateTime(v) => DatapointKind::DateTime(v.subtype()),
            Self::EightBitSet(v) => DatapointKind::EightBitSet(v.subtype()),
            Self::ColourRgb(v) => DatapointKind::ColourRgb(v.subtype()),
        }
    }
}

impl DatapointType for Datapoint {
    fn id(&self) -> DptId {
        each_datapoint!(self, v => v.id())
    }

    fn size(&self) -> usize {
        each_datapoint!(self, v => v.size())
    }

    fn bytes(&self) -> &[u8] {
        each_datapoint!(self, v => v.bytes())
    }

    fn set_bytes(&mut self, bytes: &[u8]) -> bool {
        each_datapoint!(self, v => v.set_bytes(bytes))
    }

    fn is_valid(&self) -> bool {
        each_datapoint!(self, v => v.is_valid())
    }

    fn description(&self) -> &'static str {
        each_datapoint!(self, v => v.description())
    }

    fn unit(&self) -> &'static str {
        each_datapoint!(self, v => v.unit())
    }

    fn range_text(&self) -> (&'static str, &'static str) {
        each_datapoint!(self, v => v.range_text())
    }
}

impl FromStr for Datapoint {
    type Err = KnxError;

    /// Create a default value from a `DPT-`/`DPST-` identifier.
    fn from_str(s: &str) -> Result<Self> {
        let id: DptId = s.parse()?;
        registry::create_by_id(&id).ok_or_else(KnxError::unsupported_dpt)
    }
}

/// Round half away from zero.
pub(crate) fn round(value: f64) -> f64 {
    if value >= 0.0 {
        (value + 0.5) as i64 as f64
    } else {
        (value - 0.5) as i64 as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpt_id_parse() {
        assert_eq!("DPT-1".parse::<DptId>().unwrap(), DptId::main_type(1));
        assert_eq!("DPST-232-600".parse::<DptId>().unwrap(), DptId::sub_type(232, 600));
        assert!("DPT-".parse::<DptId>().is_err());
        assert!("DPST-9".parse::<DptId>().is_err());
        assert!("DPST-9-x".parse::<DptId>().is_err());
        assert!("dpt-9".parse::<DptId>().is_err());
        assert!("DPT-+9".parse::<DptId>().is_err());
    }

    #[test]
    fn test_dpt_id_display() {
        assert_eq!(DptId::from_parts(9, 0).to_string(), "DPT-9");
        assert_eq!(DptId::from_parts(9, 1).to_string(), "DPST-9-1");
    }

    #[test]
    fn test_datapoint_from_str() {
        let dp: Datapoint = "DPST-1-1".parse().unwrap();
        assert_eq!(dp.kind(), DatapointKind::OneBit(Dpt1::Switch));
        assert_eq!(dp.id(), DptId::sub_type(1, 1));

        match "DPST-9-99".parse::<Datapoint>() {
            Err(KnxError::Dpt(e)) => assert!(e.is_unsupported()),
            other => panic!("unexpected {other:?}"),
        }
        match "DPX-9".parse::<Datapoint>() {
            Err(KnxError::Dpt(e)) => assert!(e.is_invalid_identifier()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_round() {
        assert_eq!(round(1.5), 2.0);
        assert_eq!(round(-1.5), -2.0);
        assert_eq!(round(1.49), 1.0);
        assert_eq!(round(-0.4), 0.0);
    }
}
