//! Length and code prefixed structures.
//!
//! HPAI, CRI, CRD and every DIB share one layout:
//!
//! ```text
//! ┌──────────────┬──────────────┬─────────────────────┐
//! │ Structure Len│     Code     │  Payload            │
//! │   (1 byte)   │   (1 byte)   │  (Len - 2 bytes)    │
//! └──────────────┴──────────────┴─────────────────────┘
//! ```
//!
//! [`KnxNetIpStruct`] owns the bytes; the typed wrappers declared with
//! `knx_struct!` add the code check and field accessors.

use crate::byte_store::{ByteStore, ByteStoreRef};

/// Untyped length/code/payload structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnxNetIpStruct {
    store: ByteStore,
}

impl KnxNetIpStruct {
    /// Size of the length and code octets.
    pub const HEADER_SIZE: usize = 2;

    /// Largest payload a one-octet length can describe.
    pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize - Self::HEADER_SIZE;

    /// Build a structure. A payload that does not fit yields an empty one.
    pub fn new(code: u8, payload: &[u8]) -> Self {
        if payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Self::default();
        }
        let mut store = ByteStore::from_slice(&[(payload.len() + Self::HEADER_SIZE) as u8, code]);
        store.append(payload);
        Self { store }
    }

    /// Read the structure starting at `offset`. Missing or truncated input
    /// yields an empty structure.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Self {
        let Some(&size) = bytes.get(offset) else {
            return Self::default();
        };
        let size = usize::from(size);
        if size < Self::HEADER_SIZE {
            return Self::default();
        }
        bytes
            .get(offset..offset.saturating_add(size))
            .map(|slice| Self {
                store: ByteStore::from_slice(slice),
            })
            .unwrap_or_default()
    }

    /// The raw code octet, 0 for an empty structure.
    pub fn code(&self) -> u8 {
        self.store.byte(1).unwrap_or(0)
    }

    /// Bytes following the length and code.
    pub fn payload(&self) -> &[u8] {
        self.store.as_slice().get(Self::HEADER_SIZE..).unwrap_or(&[])
    }

    /// Borrowed view of the payload.
    pub fn payload_ref(&self) -> ByteStoreRef<'_> {
        ByteStoreRef::new(self.payload())
    }

    /// Replace the payload and update the length octet.
    pub(crate) fn set_payload(&mut self, payload: &[u8]) {
        *self = Self::new(self.code(), payload);
    }

    /// Encoded size.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        self.store.as_slice()
    }

    /// Non-empty and the length octet matches the stored size.
    pub fn is_valid(&self) -> bool {
        self.store.size() >= Self::HEADER_SIZE
            && self.store.byte(0).map(usize::from) == Some(self.store.size())
    }
}

impl AsRef<[u8]> for KnxNetIpStruct {
    fn as_ref(&self) -> &[u8] {
        self.bytes()
    }
}

/// Declare a typed structure over [`KnxNetIpStruct`] whose code octet is
/// decoded as `$code`. The wrapper supplies its own `is_valid`.
macro_rules! knx_struct {
    ($(#[$meta:meta])* $name:ident, $code:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            inner: $crate::protocol::structure::KnxNetIpStruct,
        }

        impl $name {
            /// Read the structure starting at `offset`.
            pub fn from_bytes(bytes: &[u8], offset: usize) -> Self {
                Self {
                    inner: $crate::protocol::structure::KnxNetIpStruct::from_bytes(bytes, offset),
                }
            }

            /// Decoded code octet.
            pub fn code(&self) -> Option<$code> {
                <$code>::from_u8(self.inner.code())
            }

            /// Bytes following the length and code.
            pub fn payload(&self) -> &[u8] {
                self.inner.payload()
            }

            /// Borrowed view of the payload.
            pub fn payload_ref(&self) -> $crate::byte_store::ByteStoreRef<'_> {
                self.inner.payload_ref()
            }

            /// Encoded size.
            pub fn size(&self) -> usize {
                self.inner.size()
            }

            /// Encoded bytes.
            pub fn bytes(&self) -> &[u8] {
                self.inner.bytes()
            }

            /// The untyped structure.
            pub fn as_struct(&self) -> &$crate::protocol::structure::KnxNetIpStruct {
                &self.inner
            }

            #[allow(dead_code, reason = "not every structure is built from a raw payload")]
            fn with_payload(code: $code, payload: &[u8]) -> Self {
                Self {
                    inner: $crate::protocol::structure::KnxNetIpStruct::new(code as u8, payload),
                }
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.inner.bytes()
            }
        }

        impl From<$name> for $crate::protocol::structure::KnxNetIpStruct {
            fn from(value: $name) -> Self {
                value.inner
            }
        }

        impl From<$crate::protocol::structure::KnxNetIpStruct> for $name {
            fn from(inner: $crate::protocol::structure::KnxNetIpStruct) -> Self {
                Self { inner }
            }
        }
    };
}

pub(crate) use knx_struct;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let structure = KnxNetIpStruct::new(0x02, &[0x02, 0x01]);
        assert_eq!(structure.bytes(), [0x04, 0x02, 0x02, 0x01]);
        assert_eq!(structure.code(), 0x02);
        assert_eq!(structure.payload(), &[0x02, 0x01]);
        assert_eq!(structure.payload_ref().size(), 2);
        assert!(structure.is_valid());

        assert!(!KnxNetIpStruct::new(0x02, &[0; 254]).is_valid());
        assert!(KnxNetIpStruct::new(0x02, &[0; 253]).is_valid());
    }

    #[test]
    fn test_from_bytes() {
        let bytes = [0xAA, 0x04, 0x02, 0x02, 0x01, 0xBB];
        let structure = KnxNetIpStruct::from_bytes(&bytes, 1);
        assert_eq!(structure.bytes(), &bytes[1..5]);

        assert!(!KnxNetIpStruct::from_bytes(&bytes, 6).is_valid());
        assert!(!KnxNetIpStruct::from_bytes(&[0x08, 0x01, 0x00], 0).is_valid());
        assert!(!KnxNetIpStruct::from_bytes(&[0x01, 0x01], 0).is_valid());
        assert!(!KnxNetIpStruct::from_bytes(&bytes, usize::MAX).is_valid());
    }

    #[test]
    fn test_set_payload() {
        let mut structure = KnxNetIpStruct::new(0x05, &[]);
        structure.set_payload(&[0x11, 0x00]);
        assert_eq!(structure.bytes(), [0x04, 0x05, 0x11, 0x00]);
    }
}
