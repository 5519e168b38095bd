//! DPT 1.xxx - Boolean (1-bit)
//!
//! Boolean datapoint types represent binary states (on/off, true/false, etc.)
//! encoded as the least significant bit of a single octet.
//!
//! ## Format
//!
//! ```text
//! 0000 000B
//! ```
//!
//! Any of the upper seven bits set makes the octet invalid.
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::dpt::{DatapointType, Dpt1, OneBit};
//!
//! let mut switch = OneBit::new(Dpt1::Switch);
//! switch.set_value(true);
//! assert_eq!(switch.bytes(), &[0x01]);
//! assert_eq!(switch.text(), "on");
//! ```

dpt_subtypes! {
    /// DPT 1.xxx Boolean types
    pub enum Dpt1 {
        /// DPT 1.000 - Generic 1-bit value
        Generic = 0 => ("1-bit", "", "false", "true"),
        /// DPT 1.001 - Switch (off/on)
        Switch = 1 => ("Switch", "", "off", "on"),
        /// DPT 1.002 - Bool (false/true)
        Bool = 2 => ("Boolean", "", "false", "true"),
        /// DPT 1.003 - Enable (disable/enable)
        Enable = 3 => ("Enable", "", "disable", "enable"),
        /// DPT 1.004 - Ramp (no ramp/ramp)
        Ramp = 4 => ("Ramp", "", "no ramp", "ramp"),
        /// DPT 1.005 - Alarm (no alarm/alarm)
        Alarm = 5 => ("Alarm", "", "no alarm", "alarm"),
        /// DPT 1.006 - BinaryValue (low/high)
        BinaryValue = 6 => ("Binary value", "", "low", "high"),
        /// DPT 1.007 - Step (decrease/increase)
        Step = 7 => ("Step", "", "decrease", "increase"),
        /// DPT 1.008 - UpDown (up/down)
        UpDown = 8 => ("Up/Down", "", "up", "down"),
        /// DPT 1.009 - OpenClose (open/close)
        OpenClose = 9 => ("Open/Close", "", "open", "close"),
        /// DPT 1.010 - Start (stop/start)
        Start = 10 => ("Start", "", "stop", "start"),
        /// DPT 1.011 - State (inactive/active)
        State = 11 => ("State", "", "inactive", "active"),
        /// DPT 1.012 - Invert (not inverted/inverted)
        Invert = 12 => ("Invert", "", "not inverted", "inverted"),
        /// DPT 1.017 - Trigger
        Trigger = 17 => ("Trigger", "", "trigger", "trigger"),
        /// DPT 1.018 - Occupancy (not occupied/occupied)
        Occupancy = 18 => ("Occupancy", "", "not occupied", "occupied"),
        /// DPT 1.019 - Window/Door (closed/open)
        WindowDoor = 19 => ("Window/Door", "", "closed", "open"),
    }
}

impl Dpt1 {
    /// Semantic labels for the false and true states.
    pub const fn labels(self) -> (&'static str, &'static str) {
        self.range_text()
    }
}

/// 1-bit value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneBit {
    subtype: Dpt1,
    data: [u8; 1],
}

impl OneBit {
    /// Create a `false` value of the given subtype.
    pub const fn new(subtype: Dpt1) -> Self {
        Self { subtype, data: [0] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt1 {
        self.subtype
    }

    /// Current state. Only the least significant bit is read.
    pub const fn value(&self) -> bool {
        self.data[0] & 0x01 != 0
    }

    /// Set the state. Every boolean is in range.
    pub fn set_value(&mut self, value: bool) -> bool {
        self.data[0] = u8::from(value);
        true
    }

    /// Label of the current state.
    pub const fn text(&self) -> &'static str {
        let (off, on) = self.subtype.labels();
        if self.value() {
            on
        } else {
            off
        }
    }

    fn check(&self) -> bool {
        self.data[0] & 0xFE == 0
    }
}

impl_datapoint_type!(OneBit, 1, 1);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::{DatapointType, DptId};

    #[test]
    fn test_set_value() {
        let mut dp = OneBit::new(Dpt1::Switch);
        assert!(!dp.value());
        assert!(dp.set_value(true));
        assert_eq!(dp.bytes(), &[0x01]);
        assert!(dp.set_value(false));
        assert_eq!(dp.bytes(), &[0x00]);
    }

    #[test]
    fn test_upper_bits_invalid() {
        let mut dp = OneBit::new(Dpt1::Bool);
        assert!(dp.set_bytes(&[0x01]));
        assert!(!dp.set_bytes(&[0xFF]));
        assert!(!dp.is_valid());
        assert!(dp.value());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let mut dp = OneBit::new(Dpt1::Bool);
        assert!(!dp.set_bytes(&[]));
        assert!(!dp.set_bytes(&[0x00, 0x01]));
        assert_eq!(dp.bytes(), &[0x00]);
    }

    #[test]
    fn test_labels() {
        let mut dp = OneBit::new(Dpt1::UpDown);
        assert_eq!(dp.text(), "up");
        dp.set_value(true);
        assert_eq!(dp.text(), "down");
        assert_eq!(Dpt1::OpenClose.labels(), ("open", "close"));
    }

    #[test]
    fn test_identifier() {
        assert_eq!(OneBit::new(Dpt1::Switch).id(), DptId::sub_type(1, 1));
        assert_eq!(OneBit::new(Dpt1::Generic).id(), DptId::main_type(1));
        assert_eq!(Dpt1::from_sub(12), Some(Dpt1::Invert));
        assert_eq!(Dpt1::from_sub(13), None);
        assert_eq!(Dpt1::ALL.len(), Dpt1::SUBTYPES.len());
    }
}
