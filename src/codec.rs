//! Big-endian integer and host-address helpers.
//!
//! All multibyte integers on the KNX/IP wire are big-endian. The
//! `*_from_bytes` readers take an offset and return `None` instead of
//! reading past the end of the input.

use crate::net::Ipv4Addr;

/// `[v]`
#[inline]
pub const fn u8_to_bytes(value: u8) -> [u8; 1] {
    [value]
}

/// Big-endian `u16`.
#[inline]
pub const fn u16_to_bytes(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Low 24 bits of `value`, big-endian.
#[inline]
pub const fn u24_to_bytes(value: u32) -> [u8; 3] {
    let [_, a, b, c] = value.to_be_bytes();
    [a, b, c]
}

/// Big-endian `u32`.
#[inline]
pub const fn u32_to_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Byte at `offset`.
#[inline]
pub fn u8_from_bytes(bytes: &[u8], offset: usize) -> Option<u8> {
    bytes.get(offset).copied()
}

/// Big-endian `u16` at `offset`.
#[inline]
pub fn u16_from_bytes(bytes: &[u8], offset: usize) -> Option<u16> {
    Some(u16::from_be_bytes(array_at(bytes, offset)?))
}

/// Big-endian 24-bit value at `offset`.
#[inline]
pub fn u24_from_bytes(bytes: &[u8], offset: usize) -> Option<u32> {
    let [a, b, c] = array_at(bytes, offset)?;
    Some(u32::from_be_bytes([0, a, b, c]))
}

/// Big-endian `u32` at `offset`.
#[inline]
pub fn u32_from_bytes(bytes: &[u8], offset: usize) -> Option<u32> {
    Some(u32::from_be_bytes(array_at(bytes, offset)?))
}

/// Wire form of an IPv4 host address.
#[inline]
pub const fn host_address_to_bytes(address: Ipv4Addr) -> [u8; 4] {
    address.octets()
}

/// IPv4 host address at `offset`.
#[inline]
pub fn host_address_from_bytes(bytes: &[u8], offset: usize) -> Option<Ipv4Addr> {
    array_at::<4>(bytes, offset).map(Ipv4Addr::from)
}

/// Copy `len` bytes from `offset` into any byte container.
///
/// Returns an empty container when the range does not fit.
///
/// ```
/// use knx_ip_core::codec::bytes;
///
/// let source = [1u8, 2, 3, 4];
/// let copy: Vec<u8> = bytes(&source, 1, 2);
/// assert_eq!(copy, [2, 3]);
/// let none: Vec<u8> = bytes(&source, 3, 2);
/// assert!(none.is_empty());
/// ```
pub fn bytes<C>(container: impl AsRef<[u8]>, offset: usize, len: usize) -> C
where
    C: FromIterator<u8> + Default,
{
    let source = container.as_ref();
    offset
        .checked_add(len)
        .and_then(|end| source.get(offset..end))
        .map_or_else(C::default, |range| range.iter().copied().collect())
}

/// Fixed-size array at `offset`.
#[inline]
pub(crate) fn array_at<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    bytes.get(offset..end)?.try_into().ok()
}
