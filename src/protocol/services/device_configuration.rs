//! `DEVICE_CONFIGURATION_REQUEST` / `DEVICE_CONFIGURATION_ACK`.

use alloc::vec::Vec;

use super::service_frame;
use crate::protocol::cemi::DeviceManagementFrame;
use crate::protocol::connection_header::ConnectionHeader;
use crate::protocol::constants::ErrorCode;

service_frame!(
    /// Device management cEMI sent over a management connection.
    ///
    /// ```text
    /// [header][connection header][cEMI device management]
    /// ```
    DeviceConfigurationRequest,
    DeviceConfigurationRequest
);

impl DeviceConfigurationRequest {
    /// Build a request.
    pub fn new(header: &ConnectionHeader, cemi: &DeviceManagementFrame) -> Self {
        let mut body = Vec::with_capacity(header.size() + cemi.size());
        body.extend_from_slice(header.bytes());
        body.extend_from_slice(cemi.bytes());
        Self::with_body(&body)
    }

    /// Channel and sequence counter.
    pub fn connection_header(&self) -> ConnectionHeader {
        ConnectionHeader::from_bytes(self.body(), 0)
    }

    /// Carried management frame.
    pub fn cemi(&self) -> DeviceManagementFrame {
        let offset = self.connection_header().size();
        DeviceManagementFrame::from_bytes(self.body().get(offset..).unwrap_or(&[]))
    }

    /// Valid connection header followed by a valid management frame.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid() && self.connection_header().is_valid() && self.cemi().is_valid()
    }
}

service_frame!(
    /// Acknowledgement of a device configuration request.
    DeviceConfigurationAck,
    DeviceConfigurationAck
);

impl DeviceConfigurationAck {
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
    use crate::protocol::cemi::interface_object::property;
    use crate::protocol::cemi::InterfaceObjectType;

    #[test]
    fn test_request() {
        let cemi = DeviceManagementFrame::property_read_request(
            InterfaceObjectType::Device,
            1,
            property::SERIAL_NUMBER,
            1,
            1,
        );
        let request = DeviceConfigurationRequest::new(&ConnectionHeader::new(2, 9, 0), &cemi);
        assert!(request.is_valid());
        assert_eq!(request.size(), 6 + 4 + 7);
        assert_eq!(request.connection_header().sequence_count(), 9);
        assert_eq!(request.cemi(), cemi);
    }

    #[test]
    fn test_ack() {
        let ack = DeviceConfigurationAck::new(2, 9, ErrorCode::NoError);
        assert_eq!(ack.bytes(), [0x06, 0x10, 0x03, 0x11, 0x00, 0x0A, 0x04, 0x02, 0x09, 0x00]);
        assert!(ack.is_valid());
        assert_eq!(ack.status(), Some(ErrorCode::NoError));
    }
}
