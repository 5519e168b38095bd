//! Property tests for address text, DPT 9 encoding, byte round trips and
//! untrusted input.

use knx_ip_core::dpt::{DatapointType, Dpt9, TwoByteFloat};
use knx_ip_core::protocol::cemi::{LinkLayerFrame, Tpdu};
use knx_ip_core::protocol::hpai::Hpai;
use knx_ip_core::protocol::services::ServiceFrame;
use knx_ip_core::protocol::{Dib, KnxNetIpStruct};
use knx_ip_core::{AddressType, KnxAddress, Notation};
use proptest::prelude::*;

fn with_header(service: u16, body: &[u8]) -> Vec<u8> {
    let total = (body.len() + 6) as u16;
    let mut out = vec![0x06, 0x10];
    out.extend_from_slice(&service.to_be_bytes());
    out.extend_from_slice(&total.to_be_bytes());
    out.extend_from_slice(body);
    out
}

fn hpai_body() -> impl Strategy<Value = Vec<u8>> {
    (any::<[u8; 4]>(), any::<u16>()).prop_map(|(address, port)| {
        let mut out = vec![0x08, 0x01];
        out.extend_from_slice(&address);
        out.extend_from_slice(&port.to_be_bytes());
        out
    })
}

fn service_datagram() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        (any::<u8>(), any::<u8>(), hpai_body()).prop_map(|(channel, reserved, hpai)| {
            let mut body = vec![channel, reserved];
            body.extend_from_slice(&hpai);
            with_header(0x0207, &body)
        }),
        (any::<u8>(), hpai_body()).prop_map(|(channel, hpai)| {
            let mut body = vec![channel, 0x00];
            body.extend_from_slice(&hpai);
            with_header(0x0209, &body)
        }),
        any::<[u8; 3]>().prop_map(|[channel, seq, status]| {
            with_header(0x0421, &[0x04, channel, seq, status])
        }),
    ]
}

fn link_layer_bytes() -> impl Strategy<Value = Vec<u8>> {
    (
        prop::sample::select(vec![0x11u8, 0x29, 0x2E]),
        any::<u8>(),
        any::<u8>(),
        any::<u16>(),
        any::<u16>(),
        0u8..8,
        any::<u8>(),
        proptest::collection::vec(any::<u8>(), 0..16),
    )
        .prop_map(|(code, control1, control2, source, destination, first, second, data)| {
            let mut out = vec![code, 0x00, control1, control2 | 0x80];
            out.extend_from_slice(&source.to_be_bytes());
            out.extend_from_slice(&destination.to_be_bytes());
            out.push((data.len() + 1) as u8);
            out.extend_from_slice(&[first, second]);
            out.extend_from_slice(&data);
            out
        })
}

proptest! {
    #[test]
    fn group_address_text_round_trip(raw in any::<u16>()) {
        let address = KnxAddress::group(raw);
        for notation in [Notation::ThreeLevel, Notation::TwoLevel] {
            let text = address.to_string_with(notation);
            let parsed = KnxAddress::parse(AddressType::Group, &text).unwrap();
            prop_assert_eq!(parsed.value(), raw);
        }
    }

    #[test]
    fn individual_address_text_round_trip(raw in any::<u16>()) {
        let address = KnxAddress::individual(raw);
        let text = address.to_string_with(Notation::ThreeLevel);
        let parsed = KnxAddress::parse(AddressType::Individual, &text).unwrap();
        prop_assert_eq!(parsed, address);
        let decoded = KnxAddress::from_bytes(AddressType::Individual, &address.bytes(), 0);
        prop_assert_eq!(decoded, Some(address));
    }

    #[test]
    fn two_byte_float_is_idempotent(value in -670_760.0f32..=670_760.0) {
        let mut first = TwoByteFloat::new(Dpt9::Generic);
        prop_assert!(first.set_value(value));
        let stored = first.value();
        prop_assert!((stored - value).abs() <= value.abs() * 0.02 + 0.02);

        let mut second = TwoByteFloat::new(Dpt9::Generic);
        prop_assert!(second.set_value(stored));
        prop_assert_eq!(second.value(), stored);
        prop_assert!(second.is_valid());
    }

    #[test]
    fn parsers_accept_any_bytes(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        if let Ok(frame) = ServiceFrame::parse(&data) {
            prop_assert!(frame.frame().size() <= data.len());
        }
        let cemi = LinkLayerFrame::from_bytes(&data);
        if cemi.is_valid() {
            prop_assert!(cemi.bytes().len() <= data.len());
        }
    }

    #[test]
    fn link_layer_frame_bytes_round_trip(bytes in link_layer_bytes()) {
        let frame = LinkLayerFrame::from_bytes(&bytes);
        if frame.is_valid() {
            prop_assert_eq!(frame.bytes(), bytes);
        }
    }

    #[test]
    fn tpdu_bytes_round_trip(
        bytes in proptest::collection::vec(any::<u8>(), 1..32),
        destination in any::<u16>(),
        group in any::<bool>(),
    ) {
        let destination = if group {
            KnxAddress::group(destination)
        } else {
            KnxAddress::individual(destination)
        };
        let tpdu = Tpdu::from_bytes(&bytes, destination);
        if tpdu.is_valid() {
            prop_assert_eq!(tpdu.bytes(), bytes);
        }
    }

    #[test]
    fn structure_bytes_round_trip(
        code in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut bytes = vec![(payload.len() + 2) as u8, code];
        bytes.extend_from_slice(&payload);

        let raw = KnxNetIpStruct::from_bytes(&bytes, 0);
        prop_assert!(raw.is_valid());
        prop_assert_eq!(raw.bytes(), bytes.as_slice());
        let dib = Dib::from_bytes(&bytes, 0);
        prop_assert_eq!(dib.bytes(), bytes.as_slice());
    }

    #[test]
    fn hpai_bytes_round_trip(bytes in hpai_body()) {
        let hpai = Hpai::from_bytes(&bytes, 0);
        prop_assert!(hpai.is_valid());
        prop_assert_eq!(hpai.bytes(), bytes.as_slice());
    }

    #[test]
    fn service_frame_bytes_round_trip(datagram in service_datagram()) {
        let frame = ServiceFrame::parse(&datagram).unwrap();
        prop_assert!(frame.is_valid());
        prop_assert_eq!(frame.frame().bytes(), datagram);
    }
}
