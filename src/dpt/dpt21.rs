//! DPT 21.xxx - 8-bit set
//!
//! One octet of independent status bits. Bits without meaning for the
//! subtype are reserved and must be zero.

use bitflags::bitflags;

dpt_subtypes! {
    /// DPT 21.xxx bit set types
    pub enum Dpt21 {
        /// DPT 21.000 - Generic 8-bit set
        Generic = 0 => ("8-bit set", "", "0x00", "0xFF"),
        /// DPT 21.001 - General status
        StatusGen = 1 => ("General status", "", "0x00", "0x1F"),
        /// DPT 21.002 - Device control
        DeviceControl = 2 => ("Device control", "", "0x00", "0x07"),
    }
}

impl Dpt21 {
    /// Bits allowed for the subtype.
    pub const fn allowed_bits(self) -> u8 {
        match self {
            Dpt21::Generic => 0xFF,
            Dpt21::StatusGen => GeneralStatus::all().bits(),
            Dpt21::DeviceControl => DeviceControl::all().bits(),
        }
    }
}

bitflags! {
    /// DPT 21.001 bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GeneralStatus: u8 {
        /// Out of service
        const OUT_OF_SERVICE = 0x01;
        /// Fault
        const FAULT = 0x02;
        /// Overridden
        const OVERRIDDEN = 0x04;
        /// In alarm
        const IN_ALARM = 0x08;
        /// Alarm not acknowledged
        const ALARM_UNACKNOWLEDGED = 0x10;
    }
}

bitflags! {
    /// DPT 21.002 bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DeviceControl: u8 {
        /// Application stopped by user
        const USER_STOPPED = 0x01;
        /// Own individual address telegram seen
        const OWN_IA = 0x02;
        /// Verify mode on
        const VERIFY_MODE = 0x04;
    }
}

/// 8-bit set value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EightBitSet {
    subtype: Dpt21,
    data: [u8; 1],
}

impl EightBitSet {
    /// Create an empty set.
    pub const fn new(subtype: Dpt21) -> Self {
        Self { subtype, data: [0] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt21 {
        self.subtype
    }

    /// Raw bits.
    pub const fn value(&self) -> u8 {
        self.data[0]
    }

    /// Set raw bits. Reserved bits for the subtype are rejected.
    pub fn set_value(&mut self, bits: u8) -> bool {
        if bits & !self.subtype.allowed_bits() != 0 {
            return false;
        }
        self.data[0] = bits;
        true
    }

    /// Bits read as 21.001 general status.
    pub const fn general_status(&self) -> GeneralStatus {
        GeneralStatus::from_bits_truncate(self.data[0])
    }

    /// Bits read as 21.002 device control.
    pub const fn device_control(&self) -> DeviceControl {
        DeviceControl::from_bits_truncate(self.data[0])
    }

    fn check(&self) -> bool {
        self.data[0] & !self.subtype.allowed_bits() == 0
    }
}

impl_datapoint_type!(EightBitSet, 21, 1);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    #[test]
    fn test_general_status() {
        let mut dp = EightBitSet::new(Dpt21::StatusGen);
        let bits = GeneralStatus::FAULT | GeneralStatus::IN_ALARM;
        assert!(dp.set_value(bits.bits()));
        assert_eq!(dp.bytes(), &[0x0A]);
        assert_eq!(dp.general_status(), bits);
        assert!(!dp.set_value(0x20));
        assert!(!dp.set_bytes(&[0x80]));
    }

    #[test]
    fn test_device_control() {
        let mut dp = EightBitSet::new(Dpt21::DeviceControl);
        assert!(dp.set_value(0x07));
        assert!(!dp.set_value(0x08));
        assert_eq!(dp.device_control(), DeviceControl::all());
    }

    #[test]
    fn test_generic_accepts_all() {
        let mut dp = EightBitSet::new(Dpt21::Generic);
        assert!(dp.set_value(0xFF));
        assert!(dp.is_valid());
    }
}
