//! DPT 3.xxx - 3-bit controlled (dimming and blinds)
//!
//! Control datapoint types for stepwise dimming and blind positioning.
//!
//! ## Format
//!
//! 4 bits used, upper nibble reserved:
//! - Bit 3: Control bit (direction)
//! - Bits 0-2: Stepcode (0-7)
//!
//! ```text
//! ┌──────────┬─────────┬─────────────┐
//! │ reserved │ Control │  Stepcode   │
//! │   (4b)   │  (1b)   │    (3b)     │
//! └──────────┴─────────┴─────────────┘
//! ```
//!
//! ## Stepcode Values
//!
//! - **0**: Break/Stop - halts current operation
//! - **1-7**: Intervals (1, 2, 4, 8, 16, 32, 64 intervals respectively)
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::dpt::{DatapointType, Dpt3, StepCode, ThreeBitControlled};
//!
//! // Increase dimming by 4 intervals
//! let mut dimming = ThreeBitControlled::new(Dpt3::Dimming);
//! dimming.set_value(true, StepCode::Intervals4);
//! assert_eq!(dimming.bytes(), &[0x0B]);
//! ```

dpt_subtypes! {
    /// DPT 3.xxx 3-bit controlled types
    pub enum Dpt3 {
        /// DPT 3.000 - Generic 3-bit controlled value
        Generic = 0 => ("3-bit controlled", "", "break", "64 intervals"),
        /// DPT 3.007 - Dimming control (decrease/increase)
        Dimming = 7 => ("Dimming control", "", "decrease", "increase"),
        /// DPT 3.008 - Blind control (up/down)
        Blind = 8 => ("Blind control", "", "up", "down"),
    }
}

impl Dpt3 {
    /// Labels for the control bit: (cleared, set)
    pub const fn control_labels(self) -> (&'static str, &'static str) {
        match self {
            Dpt3::Generic => ("decrease", "increase"),
            Dpt3::Dimming | Dpt3::Blind => self.range_text(),
        }
    }
}

/// Stepcode values for 3-bit controlled types
///
/// Represents the number of intervals for the control operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum StepCode {
    /// Break/Stop - halts the current operation
    Break = 0,
    /// 1 interval
    Intervals1 = 1,
    /// 2 intervals
    Intervals2 = 2,
    /// 4 intervals
    Intervals4 = 3,
    /// 8 intervals
    Intervals8 = 4,
    /// 16 intervals
    Intervals16 = 5,
    /// 32 intervals
    Intervals32 = 6,
    /// 64 intervals (maximum)
    Intervals64 = 7,
}

impl StepCode {
    /// Decode the three stepcode bits.
    pub const fn from_bits(value: u8) -> Self {
        match value & 0x07 {
            0 => StepCode::Break,
            1 => StepCode::Intervals1,
            2 => StepCode::Intervals2,
            3 => StepCode::Intervals4,
            4 => StepCode::Intervals8,
            5 => StepCode::Intervals16,
            6 => StepCode::Intervals32,
            _ => StepCode::Intervals64,
        }
    }

    /// Get the number of intervals this stepcode represents
    ///
    /// Returns 0 for Break, otherwise 1, 2, 4, 8, 16, 32, or 64
    pub const fn intervals(self) -> u8 {
        match self {
            StepCode::Break => 0,
            StepCode::Intervals1 => 1,
            StepCode::Intervals2 => 2,
            StepCode::Intervals4 => 4,
            StepCode::Intervals8 => 8,
            StepCode::Intervals16 => 16,
            StepCode::Intervals32 => 32,
            StepCode::Intervals64 => 64,
        }
    }
}

/// 3-bit controlled value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreeBitControlled {
    subtype: Dpt3,
    data: [u8; 1],
}

impl ThreeBitControlled {
    /// Create a `Break` value.
    pub const fn new(subtype: Dpt3) -> Self {
        Self { subtype, data: [0] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt3 {
        self.subtype
    }

    /// `(control, stepcode)`
    pub const fn value(&self) -> (bool, StepCode) {
        (self.data[0] & 0x08 != 0, StepCode::from_bits(self.data[0]))
    }

    /// Set direction and stepcode.
    pub fn set_value(&mut self, control: bool, step: StepCode) -> bool {
        let control_bit = if control { 0x08 } else { 0x00 };
        self.data[0] = control_bit | (step as u8 & 0x07);
        true
    }

    fn check(&self) -> bool {
        self.data[0] & 0xF0 == 0
    }
}

impl_datapoint_type!(ThreeBitControlled, 3, 1);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    #[test]
    fn test_encode() {
        let mut dp = ThreeBitControlled::new(Dpt3::Dimming);
        dp.set_value(true, StepCode::Intervals4);
        assert_eq!(dp.bytes(), &[0x0B]);
        dp.set_value(false, StepCode::Break);
        assert_eq!(dp.bytes(), &[0x00]);
        dp.set_value(true, StepCode::Intervals64);
        assert_eq!(dp.bytes(), &[0x0F]);
    }

    #[test]
    fn test_decode() {
        let mut dp = ThreeBitControlled::new(Dpt3::Blind);
        assert!(dp.set_bytes(&[0x09]));
        assert_eq!(dp.value(), (true, StepCode::Intervals1));
        assert!(dp.set_bytes(&[0x05]));
        assert_eq!(dp.value(), (false, StepCode::Intervals16));
    }

    #[test]
    fn test_reserved_nibble() {
        let mut dp = ThreeBitControlled::new(Dpt3::Blind);
        assert!(!dp.set_bytes(&[0x1B]));
        assert!(!dp.is_valid());
    }

    #[test]
    fn test_intervals() {
        assert_eq!(StepCode::Break.intervals(), 0);
        assert_eq!(StepCode::Intervals4.intervals(), 4);
        assert_eq!(StepCode::from_bits(7), StepCode::Intervals64);
        assert_eq!(Dpt3::Blind.control_labels(), ("up", "down"));
    }
}
