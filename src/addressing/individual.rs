//! KNX Individual Address.
//!
//! Individual addresses identify physical devices: Area.Line.Device
//! with area 4 bits, line 4 bits, device 8 bits.

use core::fmt;

use super::address::{AddressType, KnxAddress};
use crate::error::{KnxError, Result};

/// KNX Individual Address (Area.Line.Device)
///
/// ```
/// use knx_ip_core::IndividualAddress;
///
/// let addr = IndividualAddress::new(1, 1, 5).unwrap();
/// assert_eq!(addr.to_string(), "1.1.5");
/// assert_eq!(addr.bytes(), [0x11, 0x05]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndividualAddress {
    raw: u16,
}

impl IndividualAddress {
    /// Maximum area value (4 bits)
    pub const MAX_AREA: u8 = 15;
    /// Maximum line value (4 bits)
    pub const MAX_LINE: u8 = 15;

    /// Create from area, line and device.
    pub fn new(area: u8, line: u8, device: u8) -> Result<Self> {
        let (area, line, device) = (u16::from(area), u16::from(line), u16::from(device));
        KnxAddress::from_parts(AddressType::Individual, area, Some(line), device)
            .map(|addr| Self { raw: addr.value() })
            .ok_or_else(KnxError::address_out_of_range)
    }

    /// Raw 16-bit value.
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Area (0-15).
    #[inline(always)]
    pub const fn area(self) -> u8 {
        ((self.raw >> 12) & 0x0F) as u8
    }

    /// Line (0-15).
    #[inline(always)]
    pub const fn line(self) -> u8 {
        ((self.raw >> 8) & 0x0F) as u8
    }

    /// Device (0-255).
    #[inline(always)]
    pub const fn device(self) -> u8 {
        (self.raw & 0xFF) as u8
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

impl From<u16> for IndividualAddress {
    #[inline(always)]
    fn from(raw: u16) -> Self {
        Self { raw }
    }
}

impl From<IndividualAddress> for u16 {
    #[inline(always)]
    fn from(addr: IndividualAddress) -> u16 {
        addr.raw
    }
}

impl From<IndividualAddress> for KnxAddress {
    #[inline]
    fn from(addr: IndividualAddress) -> Self {
        KnxAddress::individual(addr.raw)
    }
}

impl TryFrom<KnxAddress> for IndividualAddress {
    type Error = KnxError;

    fn try_from(addr: KnxAddress) -> Result<Self> {
        if addr.is_individual() {
            Ok(Self { raw: addr.value() })
        } else {
            Err(KnxError::invalid_individual_address())
        }
    }
}

impl fmt::Display for IndividualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.area(), self.line(), self.device())
    }
}

impl core::str::FromStr for IndividualAddress {
    type Err = KnxError;

    fn from_str(s: &str) -> Result<Self> {
        KnxAddress::parse(AddressType::Individual, s).map(|addr| Self { raw: addr.value() })
    }
}
