//! Discovery runs over the scripted host and, with `std`, over loopback UDP.

use knx_ip_core::knx_discovery::runner::DiscoveryRunner;
use knx_ip_core::knx_discovery::DiscoveryState;
use knx_ip_core::net::host::DiscoveryHost;
use knx_ip_core::net::mock_host::MockHost;
use knx_ip_core::protocol::constants::{KnxMedium, ServiceFamily};
use knx_ip_core::protocol::dib::{DeviceInfo, DeviceInfoDib, ServiceFamiliesDib};
use knx_ip_core::protocol::hpai::Hpai;
use knx_ip_core::protocol::services::SearchResponse;
use knx_ip_core::{DiscoveryConfig, DiscoveryEvent, IndividualAddress, IpEndpoint, Ipv4Addr};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn search_response(control: IpEndpoint, serial: [u8; 6], name: &str) -> Vec<u8> {
    let device = DeviceInfoDib::new(&DeviceInfo {
        medium: KnxMedium::Tp1,
        status: 0,
        individual_address: IndividualAddress::new(1, 1, 0).unwrap(),
        project_installation_id: 0,
        serial_number: serial,
        multicast_address: Ipv4Addr::KNX_MULTICAST,
        mac_address: [0x00, 0x24, 0x6D, 0x01, 0x02, 0x03],
        name,
    });
    let families = ServiceFamiliesDib::from_families(&[
        (ServiceFamily::Core, 2),
        (ServiceFamily::DeviceManagement, 1),
        (ServiceFamily::Tunneling, 1),
    ]);
    SearchResponse::new(&Hpai::udp(control), &device, &families).bytes()
}

#[test]
fn mock_run_reports_each_server_once() {
    init_logging();
    let first = IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 10), 3671);
    let second = IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 11), 3671);

    let mut host = MockHost::new();
    host.add_datagram(first, search_response(first, [0, 0xC5, 0, 0, 0, 1], "Router"));
    host.add_datagram(first, search_response(first, [0, 0xC5, 0, 0, 0, 1], "Router"));
    host.add_datagram(second, search_response(second, [0, 0xC5, 0, 0, 0, 2], "Interface"));

    let config = DiscoveryConfig::default().with_timeout_ms(3_000);
    let mut runner = DiscoveryRunner::new(host, config);
    let events = runner.run().unwrap();

    assert_eq!(events.first(), Some(&DiscoveryEvent::Started));
    assert_eq!(events.last(), Some(&DiscoveryEvent::Finished));
    let names: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            DiscoveryEvent::DeviceDiscovered(info) => Some(info.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["Router", "Interface"]);

    let servers = runner.discovered();
    assert!(servers.iter().all(|s| s.supports(ServiceFamily::Tunneling)));
    assert_eq!(servers[0].individual_address, IndividualAddress::new(1, 1, 0).ok());
    assert_eq!(runner.agent().state(), DiscoveryState::Idle);
    assert_eq!(runner.host().now_ms(), 3_000);
}

#[test]
fn runner_is_reusable() {
    let mut runner = DiscoveryRunner::new(MockHost::new(), DiscoveryConfig::default());
    assert_eq!(runner.run().unwrap().len(), 2);
    assert_eq!(runner.run().unwrap().len(), 2);
    assert_eq!(runner.host().sent_datagrams().len(), 2);
    assert_eq!(runner.host().close_count(), 2);
}

#[cfg(feature = "std")]
mod loopback {
    use std::net::UdpSocket;
    use std::thread;
    use std::time::Duration;

    use knx_ip_core::net::udp_host::StdUdpHost;
    use knx_ip_core::protocol::services::SearchRequest;

    use super::*;

    #[test]
    fn discovers_loopback_responder() {
        init_logging();
        let responder = UdpSocket::bind("127.0.0.1:0").unwrap();
        responder.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        let responder_endpoint = match responder.local_addr().unwrap() {
            std::net::SocketAddr::V4(addr) => IpEndpoint::from(addr),
            std::net::SocketAddr::V6(_) => unreachable!("bound to an IPv4 address"),
        };

        let server = thread::spawn(move || {
            let mut buf = [0u8; 64];
            let (len, source) = responder.recv_from(&mut buf).unwrap();
            let request = SearchRequest::from_bytes(&buf[..len], 0).unwrap();
            assert!(request.is_valid());
            let reply_to = request.discovery_endpoint().endpoint();
            let reply = search_response(responder_endpoint, [0, 0xC5, 1, 2, 3, 4], "Loopback");
            responder.send_to(&reply, std::net::SocketAddrV4::from(reply_to)).unwrap();
            source
        });

        let config = DiscoveryConfig::default()
            .with_local_address(Ipv4Addr::LOCALHOST)
            .with_search_endpoint(responder_endpoint)
            .with_timeout_ms(500);
        let mut runner = DiscoveryRunner::new(StdUdpHost::new(), config);
        let events = runner.run().unwrap();
        let source = server.join().unwrap();

        assert_eq!(events.len(), 3);
        match &events[1] {
            DiscoveryEvent::DeviceDiscovered(info) => {
                assert_eq!(info.control_endpoint, responder_endpoint);
                assert_eq!(info.name.as_str(), "Loopback");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(source.ip().is_loopback());
    }
}
