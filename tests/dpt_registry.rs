//! Registry coverage: every registered type can be created, named and
//! looked up again by its identifier.

use knx_ip_core::dpt::{registry, Datapoint, DatapointType};
use knx_ip_core::{DptId, KnxError};

fn all_types() -> impl Iterator<Item = (u16, u16)> {
    registry::main_types()
        .iter()
        .flat_map(|&main| registry::sub_types(main).iter().map(move |&sub| (main, sub)))
}

#[test]
fn main_types_are_sorted_and_sized() {
    let mains = registry::main_types();
    assert!(mains.windows(2).all(|pair| pair[0] < pair[1]));
    for &main in mains {
        assert!(registry::contains_main_type(main));
        assert!(registry::type_size(main).is_some_and(|size| size > 0), "DPT-{main}");
        assert!(!registry::sub_types(main).is_empty(), "DPT-{main}");
    }
}

#[test]
fn identifiers_round_trip() {
    for (main, sub) in all_types() {
        let dp = registry::create(main, sub).unwrap();
        let text = dp.id().to_string();
        let id: DptId = text.parse().unwrap();
        assert_eq!(id, DptId::from_parts(main, sub), "{text}");

        let again = registry::create_by_id(&id).unwrap();
        assert_eq!(again.kind(), dp.kind(), "{text}");
        assert_eq!(registry::create_by_enum(dp.kind()).id(), dp.id());
        assert!(!dp.description().is_empty(), "{text}");
    }
}

#[test]
fn wrong_length_is_rejected() {
    for (main, sub) in all_types() {
        let mut dp = registry::create(main, sub).unwrap();
        let before = dp.bytes().to_vec();
        let too_long = vec![0u8; dp.size() + 1];
        assert!(!dp.set_bytes(&too_long), "DPST-{main}-{sub}");
        assert_eq!(dp.bytes(), before.as_slice());
    }
}

#[test]
fn unknown_types() {
    assert!(!registry::contains_main_type(4));
    assert!(registry::sub_types(4).is_empty());
    assert!(registry::create(4, 1).is_none());
    assert!(registry::create(9, 999).is_none());
    assert!(registry::create_by_id(&DptId::sub_type(1, 999)).is_none());

    let bad: Result<DptId, KnxError> = "DPT-x".parse();
    assert!(matches!(bad, Err(KnxError::Dpt(ref e)) if e.is_invalid_identifier()));
}

#[test]
fn generic_and_sub_type_share_size() {
    let Some(Datapoint::TwoByteUnsigned(generic)) = registry::create(7, 0) else {
        panic!("DPT-7 must be registered");
    };
    let sub = registry::create(7, 1).unwrap();
    assert_eq!(generic.size(), sub.size());
    assert_eq!(generic.id().to_string(), "DPT-7");
}
