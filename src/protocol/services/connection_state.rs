//! `CONNECTIONSTATE_REQUEST` / `CONNECTIONSTATE_RESPONSE`.

use alloc::vec::Vec;

use super::service_frame;
use crate::protocol::constants::ErrorCode;
use crate::protocol::hpai::Hpai;

service_frame!(
    /// Heartbeat sent by the client on an open channel.
    ///
    /// ```text
    /// [header][channel][reserved][HPAI control]
    /// ```
    ConnectionStateRequest,
    ConnectionStateRequest
);

impl ConnectionStateRequest {
    /// Build a request.
    pub fn new(channel_id: u8, control_endpoint: &Hpai) -> Self {
        let mut body = Vec::from([channel_id, 0x00]);
        body.extend_from_slice(control_endpoint.bytes());
        Self::with_body(&body)
    }

    /// Channel being checked.
    pub fn channel_id(&self) -> u8 {
        self.body().first().copied().unwrap_or(0)
    }

    /// Client control endpoint.
    pub fn control_endpoint(&self) -> Hpai {
        Hpai::from_bytes(self.body(), 2)
    }

    /// Channel, reserved octet and one valid HPAI.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid()
            && self.control_endpoint().is_valid()
            && self.body().len() == 2 + Hpai::SIZE
    }
}

service_frame!(
    /// Server answer to a heartbeat.
    ///
    /// ```text
    /// [header][channel][status]
    /// ```
    ConnectionStateResponse,
    ConnectionStateResponse
);

impl ConnectionStateResponse {
    /// Build a response.
    pub fn new(channel_id: u8, status: ErrorCode) -> Self {
        Self::with_body(&[channel_id, status.to_u8()])
    }

    /// Channel that was checked.
    pub fn channel_id(&self) -> u8 {
        self.body().first().copied().unwrap_or(0)
    }

    /// Status, `None` when missing or unknown.
    pub fn status(&self) -> Option<ErrorCode> {
        self.body().get(1).copied().and_then(ErrorCode::from_u8)
    }

    /// Eight bytes with a known status.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid() && self.size() == 8 && self.status().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{IpEndpoint, Ipv4Addr};

    #[test]
    fn test_request() {
        let hpai = Hpai::udp(IpEndpoint::new(Ipv4Addr::new(192, 168, 1, 100), 3671));
        let request = ConnectionStateRequest::new(7, &hpai);
        assert!(request.is_valid());
        assert_eq!(request.size(), 16);
        assert_eq!(request.channel_id(), 7);
        assert_eq!(request.control_endpoint(), hpai);
    }

    #[test]
    fn test_response() {
        let response = ConnectionStateResponse::new(7, ErrorCode::ConnectionId);
        assert_eq!(response.bytes(), [0x06, 0x10, 0x02, 0x08, 0x00, 0x08, 0x07, 0x21]);
        assert!(response.is_valid());
        assert_eq!(response.status(), Some(ErrorCode::ConnectionId));

        let unknown = [0x06, 0x10, 0x02, 0x08, 0x00, 0x08, 0x07, 0x99];
        assert!(!ConnectionStateResponse::from_bytes(&unknown, 0).unwrap().is_valid());
    }
}
