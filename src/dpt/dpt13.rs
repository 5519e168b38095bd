//! DPT 13.xxx - 4-byte Signed Value (4 bytes)
//!
//! 32-bit signed datapoint types, big-endian two's complement.
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::dpt::{DatapointType, Dpt13, FourByteSigned};
//!
//! let mut energy = FourByteSigned::new(Dpt13::ActiveEnergy);
//! assert!(energy.set_bytes(&[0x00, 0x07, 0xA1, 0x20]));
//! assert_eq!(energy.value(), 500_000);
//! ```

dpt_subtypes! {
    /// DPT 13.xxx 32-bit signed types
    pub enum Dpt13 {
        /// DPT 13.000 - Generic 4-byte signed value
        Generic = 0 => ("4-byte signed value", "", "-2147483648", "2147483647"),
        /// DPT 13.001 - Counter Pulses (signed)
        Counter = 1 => ("Counter pulses", "pulses", "-2147483648", "2147483647"),
        /// DPT 13.002 - Flow Rate (m³/h)
        FlowRate = 2 => ("Flow rate", "m³/h", "-2147483648", "2147483647"),
        /// DPT 13.010 - Active Energy (Wh)
        ActiveEnergy = 10 => ("Active energy", "Wh", "-2147483648", "2147483647"),
        /// DPT 13.011 - Apparent Energy (`VAh`)
        ApparentEnergy = 11 => ("Apparent energy", "VAh", "-2147483648", "2147483647"),
        /// DPT 13.012 - Reactive Energy (`VArh`)
        ReactiveEnergy = 12 => ("Reactive energy", "VArh", "-2147483648", "2147483647"),
        /// DPT 13.013 - Active Energy (kWh)
        ActiveEnergyKwh = 13 => ("Active energy", "kWh", "-2147483648", "2147483647"),
        /// DPT 13.014 - Apparent Energy (kVAh)
        ApparentEnergyKvah = 14 => ("Apparent energy", "kVAh", "-2147483648", "2147483647"),
        /// DPT 13.015 - Reactive Energy (kVArh)
        ReactiveEnergyKvarh = 15 => ("Reactive energy", "kVArh", "-2147483648", "2147483647"),
        /// DPT 13.100 - Long Delta Time Period (s)
        LongDeltaTimeSec = 100 => ("Long delta time period", "s", "-2147483648", "2147483647"),
    }
}

/// 32-bit signed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourByteSigned {
    subtype: Dpt13,
    data: [u8; 4],
}

impl FourByteSigned {
    /// Create a zero value.
    pub const fn new(subtype: Dpt13) -> Self {
        Self { subtype, data: [0; 4] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt13 {
        self.subtype
    }

    /// Current value.
    #[inline]
    pub const fn value(&self) -> i32 {
        i32::from_be_bytes(self.data)
    }

    /// Set the value. The whole `i32` range is allowed.
    #[inline]
    pub fn set_value(&mut self, value: i32) -> bool {
        self.data = value.to_be_bytes();
        true
    }

    #[allow(clippy::unused_self, reason = "shared validator signature")]
    fn check(&self) -> bool {
        true
    }
}

impl_datapoint_type!(FourByteSigned, 13, 4);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    #[test]
    fn test_negative() {
        let mut dp = FourByteSigned::new(Dpt13::FlowRate);
        dp.set_value(-1000);
        assert_eq!(dp.bytes(), &[0xFF, 0xFF, 0xFC, 0x18]);
        assert!(dp.set_bytes(&[0xFF, 0xFF, 0xFF, 0xFF]));
        assert_eq!(dp.value(), -1);
    }

    #[test]
    fn test_extremes() {
        let mut dp = FourByteSigned::new(Dpt13::Counter);
        dp.set_value(i32::MIN);
        assert_eq!(dp.bytes(), &[0x80, 0x00, 0x00, 0x00]);
        dp.set_value(i32::MAX);
        assert_eq!(dp.bytes(), &[0x7F, 0xFF, 0xFF, 0xFF]);
    }
}
