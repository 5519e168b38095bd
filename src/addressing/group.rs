//! KNX Group Address.
//!
//! Group addresses name logical functions. Two notations exist:
//! - 2-level: Main/Sub (e.g., 1/234)
//! - 3-level: Main/Middle/Sub (e.g., 1/2/3)
//!
//! Stored as 16 bits: main 5 bits (0-31), middle 3 bits (0-7), sub 8 bits (0-255).

use core::fmt;

use super::address::{AddressType, KnxAddress, Notation};
use crate::error::{KnxError, Result};

/// KNX Group Address
///
/// ```
/// use knx_ip_core::GroupAddress;
///
/// let addr = GroupAddress::new(1, 2, 3).unwrap();
/// assert_eq!(addr.to_string(), "1/2/3");
/// assert_eq!(addr.to_string_2level().as_str(), "1/515");
///
/// let addr: GroupAddress = "0x0A03".parse().unwrap();
/// assert_eq!(addr.middle(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupAddress {
    raw: u16,
}

impl GroupAddress {
    /// Maximum main group value (5 bits)
    pub const MAX_MAIN: u8 = 31;
    /// Maximum middle group value (3 bits)
    pub const MAX_MIDDLE: u8 = 7;
    /// Maximum sub value for 2-level format (11 bits)
    pub const MAX_SUB_2LEVEL: u16 = 2047;

    /// Create a 3-level address.
    pub fn new(main: u8, middle: u8, sub: u8) -> Result<Self> {
        KnxAddress::from_parts(AddressType::Group, main.into(), Some(middle.into()), sub.into())
            .map(|addr| Self { raw: addr.value() })
            .ok_or_else(KnxError::address_out_of_range)
    }

    /// Create a 2-level address.
    pub fn new_2level(main: u8, sub: u16) -> Result<Self> {
        KnxAddress::from_parts(AddressType::Group, main.into(), None, sub)
            .map(|addr| Self { raw: addr.value() })
            .ok_or_else(KnxError::address_out_of_range)
    }

    /// Raw 16-bit value.
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Main group (0-31).
    #[inline(always)]
    pub const fn main(self) -> u8 {
        ((self.raw >> 11) & 0x1F) as u8
    }

    /// Middle group for 3-level format (0-7).
    #[inline(always)]
    pub const fn middle(self) -> u8 {
        ((self.raw >> 8) & 0x07) as u8
    }

    /// Sub group for 3-level format (0-255).
    #[inline(always)]
    pub const fn sub(self) -> u8 {
        (self.raw & 0xFF) as u8
    }

    /// Sub group for 2-level format (0-2047).
    #[inline(always)]
    pub const fn sub_2level(self) -> u16 {
        self.raw & 0x07FF
    }

    /// 3-level text.
    pub fn to_string_3level(&self) -> heapless::String<16> {
        KnxAddress::from(*self).to_string_with(Notation::ThreeLevel)
    }

    /// 2-level text.
    pub fn to_string_2level(&self) -> heapless::String<16> {
        KnxAddress::from(*self).to_string_with(Notation::TwoLevel)
    }

    /// Big-endian wire form.
    #[inline]
    pub const fn bytes(&self) -> [u8; 2] {
        self.raw.to_be_bytes()
    }

    /// Read two big-endian bytes at `offset`.
    #[inline]
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Option<Self> {
        crate::codec::u16_from_bytes(bytes, offset).map(Self::from)
    }
}

impl From<u16> for GroupAddress {
    #[inline(always)]
    fn from(raw: u16) -> Self {
        Self { raw }
    }
}

impl From<GroupAddress> for u16 {
    #[inline(always)]
    fn from(addr: GroupAddress) -> u16 {
        addr.raw
    }
}

impl From<GroupAddress> for KnxAddress {
    #[inline]
    fn from(addr: GroupAddress) -> Self {
        KnxAddress::group(addr.raw)
    }
}

impl TryFrom<KnxAddress> for GroupAddress {
    type Error = KnxError;

    fn try_from(addr: KnxAddress) -> Result<Self> {
        if addr.is_group() {
            Ok(Self { raw: addr.value() })
        } else {
            Err(KnxError::invalid_group_address())
        }
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main(), self.middle(), self.sub())
    }
}

impl core::str::FromStr for GroupAddress {
    type Err = KnxError;

    fn from_str(s: &str) -> Result<Self> {
        KnxAddress::parse(AddressType::Group, s).map(|addr| Self { raw: addr.value() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_3level() {
        let addr = GroupAddress::new(1, 2, 3).unwrap();
        assert_eq!((addr.main(), addr.middle(), addr.sub()), (1, 2, 3));
        assert!(GroupAddress::new(32, 0, 0).is_err());
        assert!(GroupAddress::new(0, 8, 0).is_err());
    }

    #[test]
    fn test_new_2level() {
        let addr = GroupAddress::new_2level(1, 234).unwrap();
        assert_eq!(addr.sub_2level(), 234);
        assert!(GroupAddress::new_2level(0, 2048).is_err());
    }

    #[test]
    fn test_bytes() {
        let addr = GroupAddress::new(31, 7, 255).unwrap();
        assert_eq!(addr.bytes(), [0xFF, 0xFF]);
        assert_eq!(GroupAddress::from_bytes(&addr.bytes(), 0), Some(addr));
        assert_eq!(GroupAddress::from_bytes(&[0xFF], 0), None);
    }

    #[test]
    fn test_text() {
        let addr: GroupAddress = "1/234".parse().unwrap();
        assert_eq!(addr.to_string_2level().as_str(), "1/234");
        assert_eq!(format!("{addr}"), "1/0/234");
        assert!("1".parse::<GroupAddress>().is_ok());
        assert!("1.2.3".parse::<GroupAddress>().is_err());
    }

    #[test]
    fn test_knx_address_conversion() {
        let addr = GroupAddress::new(1, 2, 3).unwrap();
        let generic = KnxAddress::from(addr);
        assert!(generic.is_group());
        assert_eq!(GroupAddress::try_from(generic).unwrap(), addr);
        assert!(GroupAddress::try_from(KnxAddress::individual(1)).is_err());
    }
}
