//! Wire-level scenarios across the public API.

use knx_ip_core::dpt::{registry, Datapoint, DatapointType};
use knx_ip_core::protocol::cemi::{AdditionalInfo, AdditionalInfoType};
use knx_ip_core::protocol::constants::{ErrorCode, HostProtocol, ServiceFamily, ServiceType};
use knx_ip_core::protocol::dib::KnxAddressesDib;
use knx_ip_core::protocol::services::{DisconnectResponse, SearchResponse, ServiceFrame};
use knx_ip_core::{
    AddressType, IndividualAddress, IpEndpoint, Ipv4Addr, KnxAddress, KnxError, Notation,
};

#[test]
fn group_address_notations() {
    let ga = KnxAddress::parse(AddressType::Group, "1/2/3").unwrap();
    assert_eq!(ga.value(), 0x0A03);
    assert_eq!(ga.to_string_with(Notation::ThreeLevel).as_str(), "1/2/3");
    assert_eq!(ga.to_string_with(Notation::TwoLevel).as_str(), "1/515");

    let two_level = KnxAddress::parse(AddressType::Group, "1/515").unwrap();
    assert_eq!(two_level, ga);
}

#[test]
fn individual_address_flags() {
    let ia = KnxAddress::parse(AddressType::Individual, "1.1.1").unwrap();
    assert_eq!(ia.value(), 0x1101);
    assert_eq!(ia.bytes(), [0x11, 0x01]);
    assert!(!ia.is_coupler_or_router());
    assert!(!ia.is_unregistered());
    assert_eq!(IndividualAddress::new(1, 1, 1).unwrap().raw(), 0x1101);
}

#[test]
fn two_byte_float_negative() {
    let Some(Datapoint::TwoByteFloat(mut temperature)) = registry::create(9, 1) else {
        panic!("DPST-9-1 must be registered");
    };
    assert!(temperature.set_value(-5.2));
    assert!((temperature.value() - -5.2).abs() < 0.01);
    assert_eq!(temperature.bytes()[0] & 0x80, 0x80);
    assert!(temperature.is_valid());
}

#[test]
fn busmonitor_status_info_length() {
    let info = AdditionalInfo::new(AdditionalInfoType::BusmonitorStatusInfo, &[0x00]);
    assert!(info.is_valid());
    assert_eq!(info.bytes(), [0x03, 0x01, 0x00]);

    let wrong = AdditionalInfo::new(AdditionalInfoType::BusmonitorStatusInfo, &[0x00, 0x00]);
    assert!(!wrong.is_valid());
}

#[test]
fn knx_addresses_dib_bytes() {
    let addresses = [
        IndividualAddress::new(1, 1, 0).unwrap(),
        IndividualAddress::new(1, 2, 5).unwrap(),
        IndividualAddress::new(2, 3, 8).unwrap(),
    ];
    let dib = KnxAddressesDib::new(&addresses);
    assert_eq!(dib.bytes(), [0x08, 0x05, 0x11, 0x00, 0x12, 0x05, 0x23, 0x08]);
    assert!(dib.is_valid());
    assert_eq!(dib.individual_addresses(), addresses);
}

const SEARCH_RESPONSE: [u8; 72] = [
    0x06, 0x10, 0x02, 0x02, 0x00, 0x48, // header, total 72
    0x08, 0x01, 192, 168, 2, 12, 0x0E, 0x57, // HPAI 192.168.2.12:3671
    0x36, 0x01, 0x02, 0x00, 0x11, 0x00, 0x00, 0x00, // device info: TP1, 1.1.0
    0x00, 0x01, 0x11, 0x00, 0x00, 0x11, // serial number
    224, 0, 23, 12, // routing multicast
    0x45, 0x49, 0x42, 0x6E, 0x65, 0x74, // MAC
    b'K', b'N', b'X', b' ', b'I', b'P', 0, 0, 0, 0, // name
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0x04, 0x02, 0x02, 0x01, // supported families: core v1
];

#[test]
fn search_response_datagram() {
    let frame = ServiceFrame::parse(&SEARCH_RESPONSE).unwrap();
    assert_eq!(frame.service_type(), Some(ServiceType::SearchResponse));
    assert!(frame.is_valid());

    let response = SearchResponse::from_bytes(&SEARCH_RESPONSE, 0).unwrap();
    assert!(response.is_valid());
    assert_eq!(response.size(), 72);

    let hpai = response.control_endpoint();
    assert_eq!(hpai.host_protocol(), Some(HostProtocol::Ipv4Udp));
    assert_eq!(hpai.endpoint(), IpEndpoint::new(Ipv4Addr::new(192, 168, 2, 12), 3671));

    let device = response.device_hardware();
    assert_eq!(device.device_name().as_str(), "KNX IP");
    assert_eq!(device.serial_number(), [0x00, 0x01, 0x11, 0x00, 0x00, 0x11]);

    let families = response.supported_families();
    assert!(families.contains(ServiceFamily::Core));
    assert_eq!(families.version(ServiceFamily::Core), Some(1));
}

#[test]
fn disconnect_response_bytes() {
    let response = DisconnectResponse::new(1, ErrorCode::NoError);
    assert_eq!(response.bytes(), [0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x01, 0x00]);
    assert!(response.is_valid());

    let parsed = ServiceFrame::parse(&response.bytes()).unwrap();
    assert!(matches!(parsed, ServiceFrame::DisconnectResponse(ref r) if r.channel_id() == 1));
}

#[test]
fn dispatcher_rejects_malformed_headers() {
    let unknown = [0x06, 0x10, 0x7F, 0x7F, 0x00, 0x06];
    assert!(matches!(
        ServiceFrame::parse(&unknown),
        Err(KnxError::Protocol(ref e)) if e.is_unsupported_service_type()
    ));

    let truncated = &SEARCH_RESPONSE[..40];
    assert!(matches!(
        ServiceFrame::parse(truncated),
        Err(KnxError::Protocol(ref e)) if e.is_invalid_frame()
    ));
}
