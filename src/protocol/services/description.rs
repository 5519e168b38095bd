//! `DESCRIPTION_REQUEST` / `DESCRIPTION_RESPONSE`.

use alloc::vec::Vec;

use super::service_frame;
use crate::protocol::dib::{DeviceInfoDib, Dib, ServiceFamiliesDib};
use crate::protocol::hpai::Hpai;

service_frame!(
    /// Unicast request for a server's self description.
    DescriptionRequest,
    DescriptionRequest
);

impl DescriptionRequest {
    /// Request the description, replying to `control_endpoint`.
    pub fn new(control_endpoint: &Hpai) -> Self {
        Self::with_body(control_endpoint.bytes())
    }

    /// Where the reply should go.
    pub fn control_endpoint(&self) -> Hpai {
        Hpai::from_bytes(self.body(), 0)
    }

    /// Valid frame carrying exactly one valid HPAI.
    pub fn is_valid(&self) -> bool {
        let hpai = self.control_endpoint();
        self.frame.is_valid() && hpai.is_valid() && self.body().len() == hpai.size()
    }
}

service_frame!(
    /// Device information, supported families and any further DIBs.
    ///
    /// ```text
    /// [header][DeviceInfo DIB][ServiceFamilies DIB][optional DIBs...]
    /// ```
    DescriptionResponse,
    DescriptionResponse
);

impl DescriptionResponse {
    /// Build a response.
    pub fn new(
        device_hardware: &DeviceInfoDib,
        supported_families: &ServiceFamiliesDib,
        optional_dibs: &[Dib],
    ) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(device_hardware.bytes());
        body.extend_from_slice(supported_families.bytes());
        for dib in optional_dibs {
            body.extend_from_slice(dib.bytes());
        }
        Self::with_body(&body)
    }

    /// Device information of the server.
    pub fn device_hardware(&self) -> DeviceInfoDib {
        DeviceInfoDib::from_bytes(self.body(), 0)
    }

    /// Service families the server supports.
    pub fn supported_families(&self) -> ServiceFamiliesDib {
        ServiceFamiliesDib::from_bytes(self.body(), self.device_hardware().size())
    }

    /// DIBs after the supported families.
    pub fn optional_dibs(&self) -> Vec<Dib> {
        let offset = self.device_hardware().size() + self.supported_families().size();
        Dib::parse_all(self.body(), offset)
    }

    /// Valid mandatory DIBs, valid optional DIBs, and nothing left over.
    pub fn is_valid(&self) -> bool {
        let device = self.device_hardware();
        let families = self.supported_families();
        if !(self.frame.is_valid() && device.is_valid() && families.is_valid()) {
            return false;
        }
        let optional = self.optional_dibs();
        let consumed = device.size()
            + families.size()
            + optional.iter().map(Dib::size).sum::<usize>();
        optional.iter().all(Dib::is_valid) && consumed == self.body().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::IndividualAddress;
    use crate::net::{IpEndpoint, Ipv4Addr};
    use crate::protocol::constants::{KnxMedium, ServiceFamily};
    use crate::protocol::dib::{DeviceInfo, KnxAddressesDib, ManufacturerDataDib};

    fn device() -> DeviceInfoDib {
        DeviceInfoDib::new(&DeviceInfo {
            medium: KnxMedium::Ip,
            status: 0,
            individual_address: IndividualAddress::from(0x1100),
            project_installation_id: 0,
            serial_number: [0; 6],
            multicast_address: Ipv4Addr::KNX_MULTICAST,
            mac_address: [0; 6],
            name: "interface",
        })
    }

    #[test]
    fn test_request() {
        let hpai = Hpai::udp(IpEndpoint::new(Ipv4Addr::new(10, 0, 0, 2), 3671));
        let request = DescriptionRequest::new(&hpai);
        assert!(request.is_valid());
        assert_eq!(request.control_endpoint().endpoint().port, 3671);
    }

    #[test]
    fn test_response_with_optional_dibs() {
        let families = ServiceFamiliesDib::from_families(&[
            (ServiceFamily::Core, 1),
            (ServiceFamily::Tunneling, 1),
        ]);
        let optional = [
            Dib::from(KnxAddressesDib::new(&[IndividualAddress::from(0x1101)])),
            Dib::from(ManufacturerDataDib::new(0x00C5, &[0xAA])),
        ];
        let response = DescriptionResponse::new(&device(), &families, &optional);
        assert!(response.is_valid());
        assert_eq!(response.optional_dibs(), optional);
        assert_eq!(response.supported_families().families().len(), 2);

        let bare = DescriptionResponse::new(&device(), &families, &[]);
        assert!(bare.is_valid());
        assert!(bare.optional_dibs().is_empty());
    }

    #[test]
    fn test_response_with_unknown_dib_invalid() {
        let families = ServiceFamiliesDib::from_families(&[(ServiceFamily::Core, 1)]);
        let mut bytes = DescriptionResponse::new(&device(), &families, &[]).bytes();
        bytes.extend_from_slice(&[0x02, 0x77]);
        let total = bytes.len() as u16;
        bytes[4..6].copy_from_slice(&total.to_be_bytes());
        let response = DescriptionResponse::from_bytes(&bytes, 0).unwrap();
        assert!(!response.is_valid());
    }
}
