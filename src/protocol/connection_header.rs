//! Connection header of tunneling and device configuration frames.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────────┬─────────────┐
//! │ Structure Len│  Channel ID  │ Sequence Ctr │ Service Specific │ Extra items │
//! │   (1 byte)   │   (1 byte)   │   (1 byte)   │     (1 byte)     │ (Len - 4)   │
//! └──────────────┴──────────────┴──────────────┴──────────────────┴─────────────┘
//! ```

use alloc::vec::Vec;

use crate::byte_store::{ByteStore, ByteStoreRef};

/// Channel, sequence counter and optional connection-type specific items.
///
/// ```
/// use knx_ip_core::protocol::connection_header::ConnectionHeader;
///
/// let header = ConnectionHeader::new(0x15, 0x03, 0x00);
/// assert_eq!(header.bytes(), [0x04, 0x15, 0x03, 0x00]);
/// assert!(header.is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionHeader {
    store: ByteStore,
}

impl ConnectionHeader {
    /// Size without connection-type specific items.
    pub const MIN_SIZE: usize = 4;

    /// Create a 4-byte header.
    pub fn new(channel_id: u8, sequence_count: u8, service_type_specific: u8) -> Self {
        Self {
            store: ByteStore::from_slice(&[
                Self::MIN_SIZE as u8,
                channel_id,
                sequence_count,
                service_type_specific,
            ]),
        }
    }

    /// Read a header at `offset`. A missing or truncated header yields an
    /// empty one.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Self {
        let Some(&size) = bytes.get(offset) else {
            return Self::default();
        };
        let size = usize::from(size);
        if size < Self::MIN_SIZE {
            return Self::default();
        }
        bytes
            .get(offset..offset + size)
            .map(|slice| Self {
                store: ByteStore::from_slice(slice),
            })
            .unwrap_or_default()
    }

    /// Communication channel id.
    pub fn channel_id(&self) -> u8 {
        self.store.byte(1).unwrap_or(0)
    }

    /// Set the channel id.
    pub fn set_channel_id(&mut self, id: u8) {
        self.set(1, id);
    }

    /// Sequence counter.
    pub fn sequence_count(&self) -> u8 {
        self.store.byte(2).unwrap_or(0)
    }

    /// Set the sequence counter.
    pub fn set_sequence_count(&mut self, count: u8) {
        self.set(2, count);
    }

    /// Service-type specific octet, the status code in acknowledgements.
    pub fn service_type_specific_value(&self) -> u8 {
        self.store.byte(3).unwrap_or(0)
    }

    /// Set the service-type specific octet.
    pub fn set_service_type_specific_value(&mut self, value: u8) {
        self.set(3, value);
    }

    /// Items following the fixed four octets.
    pub fn connection_type_specific_items(&self) -> &[u8] {
        self.store.as_slice().get(Self::MIN_SIZE..).unwrap_or(&[])
    }

    /// Replace the trailing items. Rejected when the header would outgrow
    /// its one-octet length.
    pub fn set_connection_type_specific_items(&mut self, items: &[u8]) -> bool {
        if items.len() > usize::from(u8::MAX) - Self::MIN_SIZE {
            return false;
        }
        if self.store.size() < Self::MIN_SIZE {
            *self = Self::new(0, 0, 0);
        }
        self.store.resize(Self::MIN_SIZE);
        self.store.append(items);
        self.set(0, (Self::MIN_SIZE + items.len()) as u8);
        true
    }

    /// Encoded size.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        self.store.as_slice()
    }

    /// Borrowed view of the header.
    pub fn as_ref_view(&self) -> ByteStoreRef<'_> {
        self.store.as_ref_view()
    }

    /// Owned copy of the encoded bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.store.as_slice().to_vec()
    }

    /// At least four bytes and the length octet matches.
    pub fn is_valid(&self) -> bool {
        self.store.size() >= Self::MIN_SIZE
            && self.store.byte(0).map(usize::from) == Some(self.store.size())
    }

    fn set(&mut self, index: usize, value: u8) {
        if self.store.size() < Self::MIN_SIZE {
            *self = Self::new(0, 0, 0);
        }
        // Index is below MIN_SIZE, so the store always has room.
        let _ = self.store.set_byte(index, value);
    }
}

impl AsRef<[u8]> for ConnectionHeader {
    fn as_ref(&self) -> &[u8] {
        self.bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let bytes = [0x00, 0x04, 0x01, 0x7F, 0x21, 0xAA];
        let header = ConnectionHeader::from_bytes(&bytes, 1);
        assert!(header.is_valid());
        assert_eq!(header.channel_id(), 0x01);
        assert_eq!(header.sequence_count(), 0x7F);
        assert_eq!(header.service_type_specific_value(), 0x21);
        assert!(header.connection_type_specific_items().is_empty());
    }

    #[test]
    fn test_specific_items() {
        let mut header = ConnectionHeader::new(1, 2, 3);
        assert!(header.set_connection_type_specific_items(&[0xDE, 0xAD]));
        assert_eq!(header.bytes(), [0x06, 0x01, 0x02, 0x03, 0xDE, 0xAD]);

        let parsed = ConnectionHeader::from_bytes(header.bytes(), 0);
        assert_eq!(parsed.connection_type_specific_items(), &[0xDE, 0xAD]);
        assert_eq!(parsed, header);

        assert!(!header.set_connection_type_specific_items(&[0; 252]));
        assert_eq!(header.size(), 6);
    }

    #[test]
    fn test_setters() {
        let mut header = ConnectionHeader::default();
        assert!(!header.is_valid());
        header.set_channel_id(9);
        header.set_sequence_count(8);
        header.set_service_type_specific_value(7);
        assert_eq!(header.bytes(), [0x04, 9, 8, 7]);
    }

    #[test]
    fn test_truncated() {
        assert!(!ConnectionHeader::from_bytes(&[], 0).is_valid());
        assert!(!ConnectionHeader::from_bytes(&[0x06, 0x01, 0x02, 0x03], 0).is_valid());
        assert!(!ConnectionHeader::from_bytes(&[0x03, 0x01, 0x02], 0).is_valid());
    }
}
