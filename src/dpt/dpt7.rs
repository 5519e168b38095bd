//! DPT 7.xxx - 2-byte Unsigned Value (2 bytes)
//!
//! 16-bit unsigned datapoint types represent values from 0 to 65535,
//! big-endian. The time period subtypes carry the raw count; the unit
//! names the resolution.
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::dpt::{DatapointType, Dpt7, TwoByteUnsigned};
//!
//! let mut lux = TwoByteUnsigned::new(Dpt7::Brightness);
//! assert!(lux.set_bytes(&[0x13, 0x88]));
//! assert_eq!(lux.value(), 5000);
//! ```

dpt_subtypes! {
    /// DPT 7.xxx 16-bit unsigned types
    pub enum Dpt7 {
        /// DPT 7.000 - Generic 2-byte unsigned value
        Generic = 0 => ("2-byte unsigned value", "", "0", "65535"),
        /// DPT 7.001 - Pulses (0-65535)
        Pulses = 1 => ("Pulses", "pulses", "0", "65535"),
        /// DPT 7.002 - Time Period (ms)
        TimePeriodMs = 2 => ("Time period", "ms", "0", "65535"),
        /// DPT 7.003 - Time Period (10ms)
        TimePeriod10Ms = 3 => ("Time period (resolution 10 ms)", "10 ms", "0", "65535"),
        /// DPT 7.004 - Time Period (100ms)
        TimePeriod100Ms = 4 => ("Time period (resolution 100 ms)", "100 ms", "0", "65535"),
        /// DPT 7.005 - Time Period (s)
        TimePeriodSec = 5 => ("Time period", "s", "0", "65535"),
        /// DPT 7.006 - Time Period (min)
        TimePeriodMin = 6 => ("Time period", "min", "0", "65535"),
        /// DPT 7.007 - Time Period (h)
        TimePeriodHr = 7 => ("Time period", "h", "0", "65535"),
        /// DPT 7.010 - Property Data Type
        PropDataType = 10 => ("Interface object property data type", "", "0", "65535"),
        /// DPT 7.011 - Length (mm)
        LengthMm = 11 => ("Length", "mm", "0", "65535"),
        /// DPT 7.012 - Current (mA)
        CurrentMa = 12 => ("Electrical current", "mA", "0", "65535"),
        /// DPT 7.013 - Brightness (lux)
        Brightness = 13 => ("Brightness", "lux", "0", "65535"),
        /// DPT 7.600 - Color Temperature (K)
        ColorTemperature = 600 => ("Absolute colour temperature", "K", "0", "65535"),
    }
}

/// 16-bit unsigned value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoByteUnsigned {
    subtype: Dpt7,
    data: [u8; 2],
}

impl TwoByteUnsigned {
    /// Create a zero value.
    pub const fn new(subtype: Dpt7) -> Self {
        Self { subtype, data: [0; 2] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt7 {
        self.subtype
    }

    /// Current value.
    #[inline]
    pub const fn value(&self) -> u16 {
        u16::from_be_bytes(self.data)
    }

    /// Set the value. The whole `u16` range is allowed.
    #[inline]
    pub fn set_value(&mut self, value: u16) -> bool {
        self.data = value.to_be_bytes();
        true
    }

    #[allow(clippy::unused_self, reason = "shared validator signature")]
    fn check(&self) -> bool {
        true
    }
}

impl_datapoint_type!(TwoByteUnsigned, 7, 2);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    #[test]
    fn test_encode() {
        let mut dp = TwoByteUnsigned::new(Dpt7::Pulses);
        dp.set_value(1234);
        assert_eq!(dp.bytes(), &[0x04, 0xD2]);
        dp.set_value(u16::MAX);
        assert_eq!(dp.bytes(), &[0xFF, 0xFF]);
    }

    #[test]
    fn test_decode() {
        let mut dp = TwoByteUnsigned::new(Dpt7::ColorTemperature);
        assert!(dp.set_bytes(&[0x0F, 0xA0]));
        assert_eq!(dp.value(), 4000);
        assert_eq!(dp.unit(), "K");
        assert!(!dp.set_bytes(&[0x0F]));
        assert_eq!(dp.value(), 4000);
    }
}
