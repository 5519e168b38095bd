//! Heap-backed byte storage shared by every wire structure.
//!
//! `ByteStore` owns its bytes; `ByteStoreRef` is a borrowed, read-only
//! view used when nested structures are decoded out of a parent buffer.
//! Reads past the end return `None`; writes past the end return an error.

use alloc::vec::Vec;
use core::ops::Range;

use crate::error::{KnxError, Result};

/// Owned, growable byte vector with checked offset access.
///
/// ```
/// use knx_ip_core::ByteStore;
///
/// let mut store = ByteStore::from_slice(&[0x06, 0x10]);
/// store.append(&[0x02, 0x01]);
/// assert_eq!(store.size(), 4);
/// assert_eq!(store.byte(3), Some(0x01));
/// assert_eq!(store.byte(4), None);
/// assert!(store.set_byte(4, 0).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteStore {
    bytes: Vec<u8>,
}

impl ByteStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create a store of `size` zero bytes.
    pub fn with_size(size: usize) -> Self {
        Self {
            bytes: alloc::vec![0; size],
        }
    }

    /// Create a store holding a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
        }
    }

    /// Number of stored bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when the store holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte at `index`.
    #[inline]
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.bytes.get(checked_range(offset, len)?)
    }

    /// All stored bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrite the byte at `index`.
    pub fn set_byte(&mut self, index: usize, value: u8) -> Result<()> {
        let slot = self
            .bytes
            .get_mut(index)
            .ok_or_else(KnxError::offset_out_of_range)?;
        *slot = value;
        Ok(())
    }

    /// Append `values` at the end.
    pub fn append(&mut self, values: &[u8]) {
        self.bytes.extend_from_slice(values);
    }

    /// Overwrite `values.len()` bytes starting at `offset`.
    pub fn replace(&mut self, offset: usize, values: &[u8]) -> Result<()> {
        let range = checked_range(offset, values.len()).ok_or_else(KnxError::offset_out_of_range)?;
        self.bytes
            .get_mut(range)
            .ok_or_else(KnxError::offset_out_of_range)?
            .copy_from_slice(values);
        Ok(())
    }

    /// Insert `values` before `offset`, growing the store.
    pub fn insert(&mut self, offset: usize, values: &[u8]) -> Result<()> {
        if offset > self.bytes.len() {
            return Err(KnxError::offset_out_of_range());
        }
        self.bytes.splice(offset..offset, values.iter().copied());
        Ok(())
    }

    /// Grow with zeros or truncate to `size` bytes.
    pub fn resize(&mut self, size: usize) {
        self.bytes.resize(size, 0);
    }

    /// Remove every byte.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Borrowed read-only view of the whole store.
    #[inline]
    pub fn as_ref_view(&self) -> ByteStoreRef<'_> {
        ByteStoreRef::new(&self.bytes)
    }

    /// Consume the store and return the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for ByteStore {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ByteStore {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for ByteStore {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl FromIterator<u8> for ByteStore {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self {
            bytes: iter.into_iter().collect(),
        }
    }
}

/// Read-only view over borrowed bytes.
///
/// The view lives no longer than the structure it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteStoreRef<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteStoreRef<'a> {
    /// Wrap a slice.
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of bytes in view.
    #[inline]
    pub const fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Byte at `index`.
    #[inline]
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        self.bytes.get(checked_range(offset, len)?)
    }

    /// View starting at `offset`, empty if out of range.
    pub fn skip(&self, offset: usize) -> ByteStoreRef<'a> {
        Self::new(self.bytes.get(offset..).unwrap_or_default())
    }

    /// The viewed bytes.
    #[inline]
    pub const fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Copy the view into an owned store.
    pub fn to_store(&self) -> ByteStore {
        ByteStore::from_slice(self.bytes)
    }
}

fn checked_range(offset: usize, len: usize) -> Option<Range<usize>> {
    Some(offset..offset.checked_add(len)?)
}
