//! `SEARCH_REQUEST` / `SEARCH_RESPONSE`.

use alloc::vec::Vec;

use super::service_frame;
use crate::protocol::dib::{DeviceInfoDib, ServiceFamiliesDib};
use crate::protocol::hpai::Hpai;

service_frame!(
    /// Multicast request asking every server to describe itself.
    ///
    /// ```text
    /// [header][HPAI discovery endpoint]
    /// ```
    SearchRequest,
    SearchRequest
);

impl SearchRequest {
    /// Request replies to be sent to `discovery_endpoint`.
    pub fn new(discovery_endpoint: &Hpai) -> Self {
        Self::with_body(discovery_endpoint.bytes())
    }

    /// Where replies should go.
    pub fn discovery_endpoint(&self) -> Hpai {
        Hpai::from_bytes(self.body(), 0)
    }

    /// Valid frame carrying exactly one valid HPAI.
    pub fn is_valid(&self) -> bool {
        let hpai = self.discovery_endpoint();
        self.frame.is_valid() && hpai.is_valid() && self.body().len() == hpai.size()
    }
}

service_frame!(
    /// Server reply to a search request.
    ///
    /// ```text
    /// [header][HPAI control endpoint][DeviceInfo DIB][ServiceFamilies DIB]
    /// ```
    SearchResponse,
    SearchResponse
);

impl SearchResponse {
    /// Build a response.
    pub fn new(
        control_endpoint: &Hpai,
        device_hardware: &DeviceInfoDib,
        supported_families: &ServiceFamiliesDib,
    ) -> Self {
        let mut body = Vec::with_capacity(
            control_endpoint.size() + device_hardware.size() + supported_families.size(),
        );
        body.extend_from_slice(control_endpoint.bytes());
        body.extend_from_slice(device_hardware.bytes());
        body.extend_from_slice(supported_families.bytes());
        Self::with_body(&body)
    }

    /// Control endpoint of the responding server.
    pub fn control_endpoint(&self) -> Hpai {
        Hpai::from_bytes(self.body(), 0)
    }

    /// Device information of the responding server.
    pub fn device_hardware(&self) -> DeviceInfoDib {
        DeviceInfoDib::from_bytes(self.body(), self.control_endpoint().size())
    }

    /// Service families the server supports.
    pub fn supported_families(&self) -> ServiceFamiliesDib {
        let offset = self.control_endpoint().size() + self.device_hardware().size();
        ServiceFamiliesDib::from_bytes(self.body(), offset)
    }

    /// Valid frame whose body is exactly three valid structures.
    pub fn is_valid(&self) -> bool {
        let hpai = self.control_endpoint();
        let device = self.device_hardware();
        let families = self.supported_families();
        self.frame.is_valid()
            && hpai.is_valid()
            && device.is_valid()
            && families.is_valid()
            && self.body().len() == hpai.size() + device.size() + families.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::IndividualAddress;
    use crate::net::{IpEndpoint, Ipv4Addr};
    use crate::protocol::constants::{KnxMedium, ServiceFamily};
    use crate::protocol::dib::DeviceInfo;

    fn device() -> DeviceInfoDib {
        DeviceInfoDib::new(&DeviceInfo {
            medium: KnxMedium::Tp1,
            status: 0,
            individual_address: IndividualAddress::from(0x1100),
            project_installation_id: 0,
            serial_number: [0, 1, 2, 3, 4, 5],
            multicast_address: Ipv4Addr::KNX_MULTICAST,
            mac_address: [0; 6],
            name: "router",
        })
    }

    #[test]
    fn test_search_request() {
        let hpai = Hpai::udp(IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 5), 50100));
        let request = SearchRequest::new(&hpai);
        assert!(request.is_valid());
        assert_eq!(request.size(), 14);
        assert_eq!(&request.bytes()[..6], &[0x06, 0x10, 0x02, 0x01, 0x00, 0x0E]);
        assert_eq!(request.discovery_endpoint(), hpai);

        let parsed = SearchRequest::from_bytes(&request.bytes(), 0).unwrap();
        assert_eq!(parsed, request);
        assert!(SearchResponse::from_bytes(&request.bytes(), 0).is_none());
    }

    #[test]
    fn test_search_response() {
        let hpai = Hpai::udp(IpEndpoint::new(Ipv4Addr::new(192, 168, 2, 12), 3671));
        let families = ServiceFamiliesDib::from_families(&[(ServiceFamily::Core, 1)]);
        let response = SearchResponse::new(&hpai, &device(), &families);
        assert!(response.is_valid());
        assert_eq!(response.size(), 72);
        assert_eq!(response.control_endpoint(), hpai);
        assert_eq!(response.device_hardware().device_name().as_str(), "router");
        assert!(response.supported_families().contains(ServiceFamily::Core));
    }

    #[test]
    fn test_search_response_invalid_body() {
        let hpai = Hpai::udp(IpEndpoint::new(Ipv4Addr::new(192, 168, 2, 12), 3671));
        let families = ServiceFamiliesDib::from_families(&[(ServiceFamily::Core, 1)]);
        let mut bytes = SearchResponse::new(&hpai, &device(), &families).bytes();
        bytes.truncate(60);
        bytes[5] = 60;
        let response = SearchResponse::from_bytes(&bytes, 0).unwrap();
        assert!(!response.is_valid());
    }
}
