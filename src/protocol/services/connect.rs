//! `CONNECT_REQUEST` / `CONNECT_RESPONSE`.

use alloc::vec::Vec;

use super::service_frame;
use crate::protocol::constants::ErrorCode;
use crate::protocol::crd::Crd;
use crate::protocol::cri::Cri;
use crate::protocol::hpai::Hpai;

service_frame!(
    /// Request to open a communication channel.
    ///
    /// ```text
    /// [header][HPAI control][HPAI data][CRI]
    /// ```
    ConnectRequest,
    ConnectRequest
);

impl ConnectRequest {
    /// Build a request.
    pub fn new(control_endpoint: &Hpai, data_endpoint: &Hpai, request_info: &Cri) -> Self {
        let mut body = Vec::with_capacity(2 * Hpai::SIZE + request_info.size());
        body.extend_from_slice(control_endpoint.bytes());
        body.extend_from_slice(data_endpoint.bytes());
        body.extend_from_slice(request_info.bytes());
        Self::with_body(&body)
    }

    /// Endpoint for connection management.
    pub fn control_endpoint(&self) -> Hpai {
        Hpai::from_bytes(self.body(), 0)
    }

    /// Endpoint for data exchange.
    pub fn data_endpoint(&self) -> Hpai {
        Hpai::from_bytes(self.body(), self.control_endpoint().size())
    }

    /// Requested connection.
    pub fn request_information(&self) -> Cri {
        let offset = self.control_endpoint().size() + self.data_endpoint().size();
        Cri::from_bytes(self.body(), offset)
    }

    /// Two valid HPAIs and a valid CRI filling the body.
    pub fn is_valid(&self) -> bool {
        let control = self.control_endpoint();
        let data = self.data_endpoint();
        let cri = self.request_information();
        self.frame.is_valid()
            && control.is_valid()
            && data.is_valid()
            && cri.is_valid()
            && self.body().len() == control.size() + data.size() + cri.size()
    }
}

service_frame!(
    /// Reply to a connect request.
    ///
    /// ```text
    /// [header][channel][status][HPAI data][CRD]    status == NoError
    /// [header][channel][status]                    otherwise
    /// ```
    ConnectResponse,
    ConnectResponse
);

impl ConnectResponse {
    /// Build a response. The data endpoint and CRD are only sent when
    /// `status` is [`ErrorCode::NoError`].
    pub fn new(
        channel_id: u8,
        status: ErrorCode,
        data_endpoint: &Hpai,
        response_data: &Crd,
    ) -> Self {
        let mut body = Vec::from([channel_id, status.to_u8()]);
        if status == ErrorCode::NoError {
            body.extend_from_slice(data_endpoint.bytes());
            body.extend_from_slice(response_data.bytes());
        }
        Self::with_body(&body)
    }

    /// Error response without endpoint or CRD.
    pub fn error(channel_id: u8, status: ErrorCode) -> Self {
        Self::with_body(&[channel_id, status.to_u8()])
    }

    /// Channel assigned by the server.
    pub fn channel_id(&self) -> u8 {
        self.body().first().copied().unwrap_or(0)
    }

    /// Status, `None` when missing or unknown.
    pub fn status(&self) -> Option<ErrorCode> {
        self.body().get(1).copied().and_then(ErrorCode::from_u8)
    }

    /// Data endpoint, present on success only.
    pub fn data_endpoint(&self) -> Option<Hpai> {
        let hpai = Hpai::from_bytes(self.body(), 2);
        hpai.is_valid().then_some(hpai)
    }

    /// Connection response data, present on success only.
    pub fn response_data(&self) -> Option<Crd> {
        let crd = Crd::from_bytes(self.body(), 2 + Hpai::SIZE);
        crd.is_valid().then_some(crd)
    }

    /// Success carries a valid endpoint and CRD filling the body; an error
    /// carries nothing after the status.
    pub fn is_valid(&self) -> bool {
        if !self.frame.is_valid() {
            return false;
        }
        match self.status() {
            Some(ErrorCode::NoError) => match (self.data_endpoint(), self.response_data()) {
                (Some(hpai), Some(crd)) => self.body().len() == 2 + hpai.size() + crd.size(),
                _ => false,
            },
            Some(_) => self.body().len() == 2,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::IndividualAddress;
    use crate::net::{IpEndpoint, Ipv4Addr};
    use crate::protocol::constants::{ConnectionType, TunnelLayer};

    fn endpoint() -> Hpai {
        Hpai::udp(IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 100), 3671))
    }

    #[test]
    fn test_request() {
        let cri = Cri::tunnel(TunnelLayer::LinkLayer);
        let request = ConnectRequest::new(&endpoint(), &endpoint(), &cri);
        assert!(request.is_valid());
        assert_eq!(request.size(), 26);
        assert_eq!(&request.bytes()[..6], &[0x06, 0x10, 0x02, 0x05, 0x00, 0x1A]);
        assert_eq!(request.request_information().tunnel_layer(), Some(TunnelLayer::LinkLayer));

        let management = ConnectRequest::new(
            &endpoint(),
            &Hpai::nat(),
            &Cri::new(ConnectionType::DeviceManagement),
        );
        assert!(management.is_valid());
        assert_eq!(management.size(), 24);
    }

    #[test]
    fn test_response_success() {
        let crd = Crd::tunnel(IndividualAddress::new(1, 1, 255).unwrap());
        let response = ConnectResponse::new(0x15, ErrorCode::NoError, &endpoint(), &crd);
        assert!(response.is_valid());
        assert_eq!(response.channel_id(), 0x15);
        assert_eq!(response.status(), Some(ErrorCode::NoError));
        assert_eq!(response.data_endpoint(), Some(endpoint()));
        assert_eq!(response.response_data(), Some(crd));
    }

    #[test]
    fn test_response_error() {
        let crd = Crd::new(ConnectionType::Tunnel);
        let response = ConnectResponse::new(0, ErrorCode::NoMoreConnections, &endpoint(), &crd);
        assert_eq!(response.bytes(), [0x06, 0x10, 0x02, 0x06, 0x00, 0x08, 0x00, 0x24]);
        assert!(response.is_valid());
        assert_eq!(response.data_endpoint(), None);
        assert_eq!(response, ConnectResponse::error(0, ErrorCode::NoMoreConnections));
    }

    #[test]
    fn test_response_success_without_crd_invalid() {
        let response = ConnectResponse::error(1, ErrorCode::NoError);
        assert!(!response.is_valid());
    }
}
