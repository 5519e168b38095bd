//! KNXnet/IP frame header and generic frame.
//!
//! ## Frame Structure
//!
//! All KNXnet/IP frames follow this structure:
//!
//! ```text
//! ┌─────────────────────────────┐
//! │  Header (6 bytes)           │
//! │  - Header Length: 0x06      │
//! │  - Protocol Version: 0x10   │
//! │  - Service Type: 2 bytes    │
//! │  - Total Length: 2 bytes    │
//! ├─────────────────────────────┤
//! │  Body (variable)            │
//! │  - Service-specific data    │
//! └─────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::protocol::constants::ServiceType;
//! use knx_ip_core::protocol::frame::KnxNetIpFrame;
//!
//! let frame = KnxNetIpFrame::from_bytes(&[0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x01, 0x00], 0);
//! assert!(frame.is_valid());
//! assert_eq!(frame.service_type(), Some(ServiceType::DisconnectResponse));
//! assert_eq!(frame.body(), &[0x01, 0x00]);
//! ```

use alloc::vec::Vec;

use crate::byte_store::{ByteStore, ByteStoreRef};
use crate::error::{KnxError, Result};
use crate::protocol::constants::{ServiceType, HEADER_SIZE_10, KNXNETIP_VERSION_10};

/// KNXnet/IP frame header (6 bytes)
///
/// ```text
/// ┌──────────────┬──────────────┬─────────────────────┐
/// │ Header Len   │ Protocol Ver │  Service Type ID    │
/// │   (1 byte)   │   (1 byte)   │     (2 bytes)       │
/// ├──────────────┴──────────────┴─────────────────────┤
/// │           Total Length (2 bytes)                   │
/// └────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnxNetIpHeader {
    header_length: u8,
    protocol_version: u8,
    service_type: u16,
    total_length: u16,
}

impl KnxNetIpHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = 6;

    /// Create a header for a body of `body_length` bytes
    pub const fn new(service_type: ServiceType, body_length: u16) -> Self {
        Self {
            header_length: HEADER_SIZE_10,
            protocol_version: KNXNETIP_VERSION_10,
            service_type: service_type.to_u16(),
            total_length: (Self::SIZE as u16).saturating_add(body_length),
        }
    }

    /// Read a header at `offset`. Short input yields an all-zero header.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Self {
        let Some(raw) = offset.checked_add(Self::SIZE).and_then(|end| bytes.get(offset..end))
        else {
            return Self::default();
        };
        Self {
            header_length: raw[0],
            protocol_version: raw[1],
            service_type: u16::from_be_bytes([raw[2], raw[3]]),
            total_length: u16::from_be_bytes([raw[4], raw[5]]),
        }
    }

    /// Parse a header, rejecting anything the dispatcher cannot handle
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Buffer is too small or the header length is not 6
    /// - Protocol version is unsupported
    /// - Service type is unknown
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(KnxError::invalid_frame());
        }
        let header = Self::from_bytes(data, 0);

        if header.header_length != HEADER_SIZE_10 {
            return Err(KnxError::invalid_frame());
        }
        if header.protocol_version != KNXNETIP_VERSION_10 {
            return Err(KnxError::unsupported_version());
        }
        if header.service_type().is_none() {
            return Err(KnxError::unsupported_service_type());
        }
        if usize::from(header.total_length) < Self::SIZE {
            return Err(KnxError::invalid_frame());
        }
        Ok(header)
    }

    /// Header length octet
    pub const fn header_length(&self) -> u8 {
        self.header_length
    }

    /// Protocol version octet
    pub const fn protocol_version(&self) -> u8 {
        self.protocol_version
    }

    /// Service type, `None` when unknown
    pub const fn service_type(&self) -> Option<ServiceType> {
        ServiceType::from_u16(self.service_type)
    }

    /// Raw service type identifier
    pub const fn service_type_raw(&self) -> u16 {
        self.service_type
    }

    /// Total length of frame (header + body)
    pub const fn total_length(&self) -> u16 {
        self.total_length
    }

    /// Expected body length from the header
    pub const fn body_length(&self) -> u16 {
        self.total_length.saturating_sub(Self::SIZE as u16)
    }

    /// Encoded header
    pub fn bytes(&self) -> [u8; Self::SIZE] {
        let [st_hi, st_lo] = self.service_type.to_be_bytes();
        let [len_hi, len_lo] = self.total_length.to_be_bytes();
        [self.header_length, self.protocol_version, st_hi, st_lo, len_hi, len_lo]
    }

    /// Header length 6, version 1.0, known service type, total length at
    /// least the header.
    pub fn is_valid(&self) -> bool {
        self.header_length == HEADER_SIZE_10
            && self.protocol_version == KNXNETIP_VERSION_10
            && self.service_type().is_some()
            && usize::from(self.total_length) >= Self::SIZE
    }
}

/// Header plus body
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnxNetIpFrame {
    header: KnxNetIpHeader,
    body: ByteStore,
}

impl KnxNetIpFrame {
    /// Largest body a 16-bit total length can describe
    pub const MAX_BODY_SIZE: usize = u16::MAX as usize - KnxNetIpHeader::SIZE;

    /// Build a frame. An oversized body yields an empty, invalid frame.
    pub fn new(service_type: ServiceType, body: &[u8]) -> Self {
        if body.len() > Self::MAX_BODY_SIZE {
            return Self::default();
        }
        Self {
            header: KnxNetIpHeader::new(service_type, body.len() as u16),
            body: ByteStore::from_slice(body),
        }
    }

    /// Read a frame at `offset`. The body ends at the header's total length
    /// or at the end of the input, whichever comes first.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Self {
        let header = KnxNetIpHeader::from_bytes(bytes, offset);
        let start = offset.saturating_add(KnxNetIpHeader::SIZE);
        let end = offset.saturating_add(usize::from(header.total_length)).min(bytes.len());
        let body = bytes.get(start..end).map(ByteStore::from_slice).unwrap_or_default();
        Self { header, body }
    }

    /// The frame header
    pub const fn header(&self) -> &KnxNetIpHeader {
        &self.header
    }

    /// Service type, `None` when unknown
    pub const fn service_type(&self) -> Option<ServiceType> {
        self.header.service_type()
    }

    /// The frame body
    pub fn body(&self) -> &[u8] {
        self.body.as_slice()
    }

    /// Borrowed view of the body
    pub fn body_ref(&self) -> ByteStoreRef<'_> {
        self.body.as_ref_view()
    }

    /// Encoded size
    pub fn size(&self) -> usize {
        KnxNetIpHeader::SIZE + self.body.size()
    }

    /// Encoded frame
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        out.extend_from_slice(&self.header.bytes());
        out.extend_from_slice(self.body.as_slice());
        out
    }

    /// Valid header whose total length matches the frame
    pub fn is_valid(&self) -> bool {
        self.header.is_valid() && usize::from(self.header.total_length) == self.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_parse() {
        let data = [
            0x06, // header length
            0x10, // protocol version
            0x02, 0x01, // service type (SEARCH_REQUEST)
            0x00, 0x0E, // total length (14 bytes)
        ];

        let header = KnxNetIpHeader::parse(&data).unwrap();
        assert_eq!(header.header_length(), 0x06);
        assert_eq!(header.protocol_version(), 0x10);
        assert_eq!(header.service_type(), Some(ServiceType::SearchRequest));
        assert_eq!(header.total_length(), 14);
        assert_eq!(header.body_length(), 8);
        assert_eq!(header.bytes(), data);
    }

    #[test]
    fn test_header_errors() {
        let short = KnxNetIpHeader::parse(&[0x06, 0x10, 0x02]);
        assert!(matches!(short, Err(KnxError::Protocol(ref e)) if e.is_invalid_frame()));

        let version = [0x06, 0x20, 0x02, 0x01, 0x00, 0x06];
        let result = KnxNetIpHeader::parse(&version);
        assert!(matches!(result, Err(KnxError::Protocol(ref e)) if e.is_unsupported_version()));

        let service = [0x06, 0x10, 0x09, 0x50, 0x00, 0x06];
        let result = KnxNetIpHeader::parse(&service);
        assert!(matches!(
            result,
            Err(KnxError::Protocol(ref e)) if e.is_unsupported_service_type()
        ));
        assert!(!KnxNetIpHeader::from_bytes(&service, 0).is_valid());
    }

    #[test]
    fn test_frame_new() {
        let frame = KnxNetIpFrame::new(ServiceType::SearchRequest, &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(frame.size(), 10);
        assert_eq!(frame.bytes(), [0x06, 0x10, 0x02, 0x01, 0x00, 0x0A, 0x01, 0x02, 0x03, 0x04]);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_frame_parse() {
        let data = [
            0x06, 0x10, // header
            0x02, 0x01, // SEARCH_REQUEST
            0x00, 0x0A, // total length = 10
            0x01, 0x02, 0x03, 0x04, // body
            0xFF, // trailing
        ];

        let frame = KnxNetIpFrame::from_bytes(&data, 0);
        assert_eq!(frame.service_type(), Some(ServiceType::SearchRequest));
        assert_eq!(frame.body(), &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(frame.body_ref().size(), 4);
        assert!(frame.is_valid());

        let truncated = KnxNetIpFrame::from_bytes(&data[..8], 0);
        assert!(!truncated.is_valid());
        assert!(!KnxNetIpFrame::from_bytes(&[], 0).is_valid());
    }

    #[test]
    fn test_offset_past_end() {
        let data = [0x06, 0x10, 0x02, 0x01, 0x00, 0x06];
        assert_eq!(KnxNetIpHeader::from_bytes(&data, usize::MAX), KnxNetIpHeader::default());
        assert_eq!(KnxNetIpHeader::from_bytes(&data, usize::MAX - 2), KnxNetIpHeader::default());

        let frame = KnxNetIpFrame::from_bytes(&data, usize::MAX - 3);
        assert!(!frame.is_valid());
        assert!(frame.body().is_empty());
    }
}
