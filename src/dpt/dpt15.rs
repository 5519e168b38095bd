//! DPT 15.000 - Entrance access (4 bytes)
//!
//! An access code of six BCD digits read by a card reader or keypad,
//! followed by status bits and an index.
//!
//! ```text
//! Byte 0: D6 D5
//! Byte 1: D4 D3
//! Byte 2: D2 D1
//! Byte 3: E P R C  index
//! ```
//!
//! `D1` is the least significant digit.

use bitflags::bitflags;

dpt_subtypes! {
    /// DPT 15.xxx access types
    pub enum Dpt15 {
        /// DPT 15.000 - Entrance access
        Generic = 0 => ("Entrance access", "", "000000", "999999"),
    }
}

bitflags! {
    /// Status bits in the high nibble of the last octet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntranceAttributes: u8 {
        /// Detection error
        const ERROR = 0x80;
        /// Access permitted
        const PERMISSION_ACCEPTED = 0x40;
        /// Read right to left
        const READ_DIRECTION = 0x20;
        /// Code is encrypted
        const ENCRYPTED = 0x10;
    }
}

/// Entrance access code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntranceAccess {
    subtype: Dpt15,
    data: [u8; 4],
}

impl EntranceAccess {
    const MAX_CODE: u32 = 999_999;

    /// Create code `000000`, no attributes, index 0.
    pub const fn new(subtype: Dpt15) -> Self {
        Self { subtype, data: [0; 4] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt15 {
        self.subtype
    }

    /// Digit `n` of the code, 1 being the least significant.
    ///
    /// `None` for `n` outside 1..=6 or when the octets are not BCD.
    pub fn digit(&self, n: u8) -> Option<u8> {
        if !(1..=6).contains(&n) || !self.check() {
            return None;
        }
        Some(self.nibble(n))
    }

    /// The whole code, `None` when the octets are not BCD.
    pub fn code(&self) -> Option<u32> {
        if !self.check() {
            return None;
        }
        Some((1..=6).rev().fold(0u32, |acc, n| acc * 10 + u32::from(self.nibble(n))))
    }

    /// Status bits.
    pub const fn attributes(&self) -> EntranceAttributes {
        EntranceAttributes::from_bits_truncate(self.data[3] & 0xF0)
    }

    /// Index of the access identification code.
    pub const fn index(&self) -> u8 {
        self.data[3] & 0x0F
    }

    /// Set code, attributes and index. Code must be at most six digits,
    /// index at most 15.
    pub fn set_value(&mut self, code: u32, attributes: EntranceAttributes, index: u8) -> bool {
        if code > Self::MAX_CODE || index > 0x0F {
            return false;
        }
        let mut digits = [0u8; 6];
        let mut rest = code;
        for digit in &mut digits {
            *digit = (rest % 10) as u8;
            rest /= 10;
        }
        self.data = [
            (digits[5] << 4) | digits[4],
            (digits[3] << 4) | digits[2],
            (digits[1] << 4) | digits[0],
            attributes.bits() | index,
        ];
        true
    }

    fn nibble(&self, n: u8) -> u8 {
        let byte = self.data[usize::from(2 - (n - 1) / 2)];
        if n % 2 == 1 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    fn check(&self) -> bool {
        self.data[..3].iter().all(|b| b >> 4 <= 9 && b & 0x0F <= 9)
    }
}

impl_datapoint_type!(EntranceAccess, 15, 4);
