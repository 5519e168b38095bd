//! `DISCONNECT_REQUEST` / `DISCONNECT_RESPONSE`.

use alloc::vec::Vec;

use super::service_frame;
use crate::protocol::constants::ErrorCode;
use crate::protocol::hpai::Hpai;

service_frame!(
    /// Request to close a channel, sent by either side.
    ///
    /// ```text
    /// [header][channel][reserved][HPAI control]
    /// ```
    DisconnectRequest,
    DisconnectRequest
);

impl DisconnectRequest {
    /// Build a request.
    pub fn new(channel_id: u8, control_endpoint: &Hpai) -> Self {
        let mut body = Vec::from([channel_id, 0x00]);
        body.extend_from_slice(control_endpoint.bytes());
        Self::with_body(&body)
    }

    /// Channel to close.
    pub fn channel_id(&self) -> u8 {
        self.body().first().copied().unwrap_or(0)
    }

    /// Control endpoint of the sender.
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
    /// Confirmation that a channel was closed.
    ///
    /// ```text
    /// [header][channel][status]
    /// ```
    DisconnectResponse,
    DisconnectResponse
);

impl DisconnectResponse {
    /// Build a response.
    pub fn new(channel_id: u8, status: ErrorCode) -> Self {
        Self::with_body(&[channel_id, status.to_u8()])
    }

    /// Closed channel.
    pub fn channel_id(&self) -> u8 {
        self.body().first().copied().unwrap_or(0)
    }

    /// Status, `None` when missing or unknown.
    pub fn status(&self) -> Option<ErrorCode> {
        self.body().get(1).copied().and_then(ErrorCode::from_u8)
    }

    /// Eight bytes in total.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid() && self.size() == 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::IpEndpoint;

    #[test]
    fn test_request() {
        let request = DisconnectRequest::new(3, &Hpai::udp(IpEndpoint::UNSPECIFIED));
        assert!(request.is_valid());
        assert_eq!(
            request.bytes(),
            [0x06, 0x10, 0x02, 0x09, 0x00, 0x10, 0x03, 0x00, 0x08, 0x01, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_response() {
        let response = DisconnectResponse::new(1, ErrorCode::NoError);
        assert_eq!(response.bytes(), [0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x01, 0x00]);
        assert!(response.is_valid());
        assert_eq!(response.channel_id(), 1);
        assert_eq!(response.status(), Some(ErrorCode::NoError));
    }
}
