//! Type-tagged KNX address.
//!
//! `KnxAddress` carries its own Group/Individual tag so that frames can
//! hold either kind behind one type (a cEMI destination is one or the other
//! depending on control field 2). Construction from parts, text or bytes
//! returns `None`/`Err` for anything outside the declared ranges.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::codec;
use crate::error::{KnxError, Result};

/// Group (multicast) or Individual (unicast) address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressType {
    /// Logical function address, `main/middle/sub`
    Group,
    /// Device address, `area.line.device`
    Individual,
}

/// Human notation for group addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// `main/sub` with an 11-bit sub group
    TwoLevel,
    /// `main/middle/sub`
    #[default]
    ThreeLevel,
}

/// 16-bit KNX address with its address type.
///
/// ```
/// use knx_ip_core::{AddressType, KnxAddress, Notation};
///
/// let ga = KnxAddress::parse(AddressType::Group, "1/2/3").unwrap();
/// assert_eq!(ga.value(), 0x0A03);
/// assert_eq!(ga.to_string_with(Notation::TwoLevel).as_str(), "1/515");
///
/// let ia = KnxAddress::parse(AddressType::Individual, "1.1.1").unwrap();
/// assert_eq!(ia.bytes(), [0x11, 0x01]);
/// assert!(!ia.is_coupler_or_router());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnxAddress {
    kind: AddressType,
    value: u16,
}

impl KnxAddress {
    /// Group address 0/0/0, the broadcast destination.
    pub const GROUP_BROADCAST: Self = Self::group(0);

    /// Individual address 15.15.255, used by unregistered devices.
    pub const UNREGISTERED: Self = Self::individual(0xFFFF);

    const GROUP_MAIN_MAX: u16 = 31;
    const GROUP_MIDDLE_MAX: u16 = 7;
    const GROUP_SUB_MAX: u16 = 255;
    const GROUP_SUB_2LEVEL_MAX: u16 = 2047;
    const INDIVIDUAL_AREA_MAX: u16 = 15;
    const INDIVIDUAL_LINE_MAX: u16 = 15;
    const INDIVIDUAL_DEVICE_MAX: u16 = 255;

    /// Wrap a raw value.
    #[inline]
    pub const fn new(kind: AddressType, value: u16) -> Self {
        Self { kind, value }
    }

    /// Raw group address.
    #[inline]
    pub const fn group(value: u16) -> Self {
        Self::new(AddressType::Group, value)
    }

    /// Raw individual address.
    #[inline]
    pub const fn individual(value: u16) -> Self {
        Self::new(AddressType::Individual, value)
    }

    /// Build from notation sections.
    ///
    /// A group address without `middle` is 2-level (`main/sub`, sub up to
    /// 2047). Individual addresses always need `middle`.
    pub fn from_parts(kind: AddressType, main: u16, middle: Option<u16>, sub: u16) -> Option<Self> {
        let value = match (kind, middle) {
            (AddressType::Group, None) => {
                if main > Self::GROUP_MAIN_MAX || sub > Self::GROUP_SUB_2LEVEL_MAX {
                    return None;
                }
                (main << 11) | sub
            }
            (AddressType::Group, Some(middle)) => {
                if main > Self::GROUP_MAIN_MAX
                    || middle > Self::GROUP_MIDDLE_MAX
                    || sub > Self::GROUP_SUB_MAX
                {
                    return None;
                }
                (main << 11) | (middle << 8) | sub
            }
            (AddressType::Individual, Some(middle)) => {
                if main > Self::INDIVIDUAL_AREA_MAX
                    || middle > Self::INDIVIDUAL_LINE_MAX
                    || sub > Self::INDIVIDUAL_DEVICE_MAX
                {
                    return None;
                }
                (main << 12) | (middle << 8) | sub
            }
            (AddressType::Individual, None) => return None,
        };
        Some(Self::new(kind, value))
    }

    /// Parse text.
    ///
    /// Accepts a single integer (`0x` hex, leading-`0` octal, or decimal),
    /// `a/b[/c]` for group addresses and `a.b.c` for individual addresses.
    /// Mixing `/` and `.` is an error.
    pub fn parse(kind: AddressType, text: &str) -> Result<Self> {
        let slashes = text.contains('/');
        let dots = text.contains('.');
        if slashes && dots {
            return Err(KnxError::mixed_address_notation());
        }

        let invalid = || match kind {
            AddressType::Group => KnxError::invalid_group_address(),
            AddressType::Individual => KnxError::invalid_individual_address(),
        };

        if !slashes && !dots {
            return parse_integer(text).map(|value| Self::new(kind, value)).ok_or_else(invalid);
        }

        let separator = match kind {
            AddressType::Group if slashes => '/',
            AddressType::Individual if dots => '.',
            _ => return Err(invalid()),
        };

        let mut sections = [0u16; 3];
        let mut count = 0;
        for part in text.split(separator) {
            let slot = sections.get_mut(count).ok_or_else(invalid)?;
            *slot = parse_integer(part).ok_or_else(invalid)?;
            count += 1;
        }

        let parts = match count {
            2 if kind == AddressType::Group => {
                Self::from_parts(kind, sections[0], None, sections[1])
            }
            3 => Self::from_parts(kind, sections[0], Some(sections[1]), sections[2]),
            _ => None,
        };
        parts.ok_or_else(KnxError::address_out_of_range)
    }

    /// Read two big-endian bytes at `offset`.
    pub fn from_bytes(kind: AddressType, bytes: &[u8], offset: usize) -> Option<Self> {
        codec::u16_from_bytes(bytes, offset).map(|value| Self::new(kind, value))
    }

    /// Address type.
    #[inline(always)]
    pub const fn address_type(&self) -> AddressType {
        self.kind
    }

    /// Raw 16-bit value.
    #[inline(always)]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Big-endian wire form.
    #[inline(always)]
    pub const fn bytes(&self) -> [u8; 2] {
        self.value.to_be_bytes()
    }

    /// `true` for group addresses.
    #[inline(always)]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, AddressType::Group)
    }

    /// `true` for individual addresses.
    #[inline(always)]
    pub const fn is_individual(&self) -> bool {
        matches!(self.kind, AddressType::Individual)
    }

    /// Group address 0.
    #[inline]
    pub const fn is_broadcast(&self) -> bool {
        self.is_group() && self.value == 0
    }

    /// Individual address with device number 0 (`x.y.0`).
    #[inline]
    pub const fn is_coupler_or_router(&self) -> bool {
        self.is_individual() && (self.value & 0x00FF) == 0
    }

    /// Individual address with device number 255 (`x.y.255`).
    #[inline]
    pub const fn is_unregistered(&self) -> bool {
        self.is_individual() && (self.value & 0x00FF) == 0x00FF
    }

    /// Main group (group) or area (individual).
    #[inline]
    pub const fn main_or_area(&self) -> u8 {
        match self.kind {
            AddressType::Group => ((self.value >> 11) & 0x1F) as u8,
            AddressType::Individual => (self.value >> 12) as u8,
        }
    }

    /// Middle group (group, 3-level) or line (individual).
    #[inline]
    pub const fn middle_or_line(&self) -> u8 {
        match self.kind {
            AddressType::Group => ((self.value >> 8) & 0x07) as u8,
            AddressType::Individual => ((self.value >> 8) & 0x0F) as u8,
        }
    }

    /// Sub group (3-level) or device number.
    #[inline]
    pub const fn sub_or_device(&self) -> u8 {
        (self.value & 0xFF) as u8
    }

    /// Format with an explicit notation.
    ///
    /// Individual addresses always use `area.line.device`.
    pub fn to_string_with(&self, notation: Notation) -> heapless::String<16> {
        use core::fmt::Write;
        let mut s = heapless::String::new();
        // 16 bytes always fit "31/2047" or "15.15.255"
        let _ = match (self.kind, notation) {
            (AddressType::Group, Notation::TwoLevel) => {
                write!(s, "{}/{}", self.main_or_area(), self.value & 0x07FF)
            }
            _ => write!(s, "{self}"),
        };
        s
    }
}

impl Hash for KnxAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes().hash(state);
    }
}

impl fmt::Display for KnxAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = self.main_or_area();
        let (middle, sub) = (self.middle_or_line(), self.sub_or_device());
        match self.kind {
            AddressType::Group => write!(f, "{main}/{middle}/{sub}"),
            AddressType::Individual => write!(f, "{main}.{middle}.{sub}"),
        }
    }
}

/// Integer with C-style radix prefix: `0x`/`0X` hex, leading `0` octal.
fn parse_integer(text: &str) -> Option<u16> {
    let text = text.trim();
    let (digits, radix) =
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            (hex, 16)
        } else if text.len() > 1 && text.starts_with('0') {
            (&text[1..], 8)
        } else {
            (text, 10)
        };
    // from_str_radix takes a leading sign
    if !digits.starts_with(|c: char| c.is_digit(radix)) {
        return None;
    }
    u16::from_str_radix(digits, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_three_level() {
        let addr = KnxAddress::parse(AddressType::Group, "1/2/3").unwrap();
        assert_eq!(addr.value(), 0x0A03);
        assert_eq!(addr.to_string_with(Notation::ThreeLevel).as_str(), "1/2/3");
        assert_eq!(addr.to_string_with(Notation::TwoLevel).as_str(), "1/515");
    }

    #[test]
    fn test_group_two_level() {
        let addr = KnxAddress::parse(AddressType::Group, "31/2047").unwrap();
        assert_eq!(addr.value(), 0xFFFF);
        assert!(KnxAddress::parse(AddressType::Group, "1/2048").is_err());
    }

    #[test]
    fn test_individual() {
        let addr = KnxAddress::parse(AddressType::Individual, "1.1.1").unwrap();
        assert_eq!(addr.value(), 0x1101);
        assert_eq!(addr.bytes(), [0x11, 0x01]);
        assert!(!addr.is_coupler_or_router());
        assert!(!addr.is_unregistered());
        assert_eq!(format!("{addr}"), "1.1.1");
    }

    #[test]
    fn test_integer_forms() {
        let hex = KnxAddress::parse(AddressType::Group, "0x0A03").unwrap();
        let oct = KnxAddress::parse(AddressType::Group, "05003").unwrap();
        let dec = KnxAddress::parse(AddressType::Group, "2563").unwrap();
        assert_eq!(hex, dec);
        assert_eq!(oct, dec);
        assert!(KnxAddress::parse(AddressType::Group, "65536").is_err());
        assert!(KnxAddress::parse(AddressType::Group, "0x").is_err());
    }

    #[test]
    fn test_sign_after_prefix_is_rejected() {
        assert!(KnxAddress::parse(AddressType::Group, "0+7").is_err());
        assert!(KnxAddress::parse(AddressType::Group, "0x+5").is_err());
        assert!(KnxAddress::parse(AddressType::Group, "+5").is_err());
        assert!(KnxAddress::parse(AddressType::Individual, "1.0x+1.1").is_err());
        assert!(KnxAddress::parse(AddressType::Group, "07").is_ok());
    }

    #[test]
    fn test_sections_accept_radix_prefix() {
        let addr = KnxAddress::parse(AddressType::Individual, "0x1.0x1.010").unwrap();
        assert_eq!(addr.value(), 0x1108);
    }

    #[test]
    fn test_rejections() {
        let mixed = KnxAddress::parse(AddressType::Group, "1/2.3").unwrap_err();
        assert!(matches!(mixed, KnxError::Addressing(ref e) if e.is_mixed_notation()));
        assert!(KnxAddress::parse(AddressType::Group, "1.2.3").is_err());
        assert!(KnxAddress::parse(AddressType::Individual, "1/2/3").is_err());
        assert!(KnxAddress::parse(AddressType::Individual, "1.2").is_err());
        assert!(KnxAddress::parse(AddressType::Individual, "16.0.0").is_err());
        assert!(KnxAddress::parse(AddressType::Group, "1/2/3/4").is_err());
        assert!(KnxAddress::parse(AddressType::Group, "").is_err());
        assert!(KnxAddress::parse(AddressType::Group, "a/b/c").is_err());
    }

    #[test]
    fn test_from_parts_limits() {
        assert!(KnxAddress::from_parts(AddressType::Group, 31, Some(7), 255).is_some());
        assert!(KnxAddress::from_parts(AddressType::Group, 32, Some(0), 0).is_none());
        assert!(KnxAddress::from_parts(AddressType::Group, 0, Some(8), 0).is_none());
        assert!(KnxAddress::from_parts(AddressType::Individual, 15, Some(15), 255).is_some());
        assert!(KnxAddress::from_parts(AddressType::Individual, 1, None, 1).is_none());
        assert!(KnxAddress::from_parts(AddressType::Individual, 1, Some(16), 1).is_none());
    }

    #[test]
    fn test_predicates() {
        assert!(KnxAddress::GROUP_BROADCAST.is_broadcast());
        assert!(!KnxAddress::individual(0).is_broadcast());
        assert!(KnxAddress::individual(0x1100).is_coupler_or_router());
        assert!(KnxAddress::UNREGISTERED.is_unregistered());
        assert!(!KnxAddress::group(0x00FF).is_unregistered());
    }

    #[test]
    fn test_from_bytes() {
        let addr = KnxAddress::from_bytes(AddressType::Individual, &[0x00, 0x11, 0x01], 1).unwrap();
        assert_eq!(addr.value(), 0x1101);
        assert!(KnxAddress::from_bytes(AddressType::Group, &[0x11], 0).is_none());
    }

    #[test]
    fn test_equality_includes_type() {
        assert_ne!(KnxAddress::group(0x1101), KnxAddress::individual(0x1101));
    }
}
