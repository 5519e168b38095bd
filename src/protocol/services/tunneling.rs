//! `TUNNELING_REQUEST` / `TUNNELING_ACK`.

use alloc::vec::Vec;

use super::service_frame;
use crate::protocol::cemi::LinkLayerFrame;
use crate::protocol::connection_header::ConnectionHeader;
use crate::protocol::constants::ErrorCode;

service_frame!(
    /// Link-layer cEMI sent over a tunnel connection.
    ///
    /// ```text
    /// [header][connection header][cEMI link layer]
    /// ```
    TunnelingRequest,
    TunnelingRequest
);

impl TunnelingRequest {
    /// Build a request.
    pub fn new(header: &ConnectionHeader, cemi: &LinkLayerFrame) -> Self {
        let cemi = cemi.bytes();
        let mut body = Vec::with_capacity(header.size() + cemi.len());
        body.extend_from_slice(header.bytes());
        body.extend_from_slice(&cemi);
        Self::with_body(&body)
    }

    /// Channel and sequence counter.
    pub fn connection_header(&self) -> ConnectionHeader {
        ConnectionHeader::from_bytes(self.body(), 0)
    }

    /// Carried link-layer frame.
    pub fn cemi(&self) -> LinkLayerFrame {
        let offset = self.connection_header().size();
        LinkLayerFrame::from_bytes(self.body().get(offset..).unwrap_or(&[]))
    }

    /// Valid connection header followed by a valid link-layer frame.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid() && self.connection_header().is_valid() && self.cemi().is_valid()
    }
}

service_frame!(
    /// Acknowledgement of a tunneling request.
    TunnelingAck,
    TunnelingAck
);

impl TunnelingAck {
    /// Acknowledge `sequence_count` on `channel_id`.
    pub fn new(channel_id: u8, sequence_count: u8, status: ErrorCode) -> Self {
        let header = ConnectionHeader::new(channel_id, sequence_count, status.to_u8());
        Self::with_body(header.bytes())
    }

    /// Channel, sequence counter and status.
    pub fn connection_header(&self) -> ConnectionHeader {
        ConnectionHeader::from_bytes(self.body(), 0)
    }

    /// Status carried in the connection header.
    pub fn status(&self) -> Option<ErrorCode> {
        ErrorCode::from_u8(self.connection_header().service_type_specific_value())
    }

    /// Body is exactly one valid connection header.
    pub fn is_valid(&self) -> bool {
        let header = self.connection_header();
        self.frame.is_valid() && header.is_valid() && self.body().len() == header.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::KnxAddress;
    use crate::protocol::cemi::tpdu_factory::multicast;
    use crate::protocol::cemi::MessageCode;

    #[test]
    fn test_request() {
        let cemi = LinkLayerFrame::with_tpdu(
            MessageCode::LDataReq,
            KnxAddress::individual(0),
            KnxAddress::group(0x0A03),
            multicast::group_value_write_short(1),
        );
        let request = TunnelingRequest::new(&ConnectionHeader::new(0x15, 0, 0), &cemi);
        assert!(request.is_valid());
        assert_eq!(
            request.bytes(),
            [
                0x06, 0x10, 0x04, 0x20, 0x00, 0x15, // header
                0x04, 0x15, 0x00, 0x00, // connection header
                0x11, 0x00, 0x94, 0xE0, 0x00, 0x00, 0x0A, 0x03, 0x01, 0x00, 0x81, // cEMI
            ]
        );
        assert_eq!(request.cemi().bytes(), cemi.bytes());
    }

    #[test]
    fn test_request_with_broken_cemi() {
        let bytes = [0x06, 0x10, 0x04, 0x20, 0x00, 0x0C, 0x04, 0x15, 0x00, 0x00, 0x11, 0x00];
        let request = TunnelingRequest::from_bytes(&bytes, 0).unwrap();
        assert!(!request.is_valid());
    }

    #[test]
    fn test_ack() {
        let ack = TunnelingAck::new(0x15, 3, ErrorCode::SequenceNumber);
        assert_eq!(ack.bytes(), [0x06, 0x10, 0x04, 0x21, 0x00, 0x0A, 0x04, 0x15, 0x03, 0x04]);
        assert!(ack.is_valid());
        assert_eq!(ack.status(), Some(ErrorCode::SequenceNumber));
    }
}
