//! DPT 5.xxx - 8-bit Unsigned Value (1 byte)
//!
//! 8-bit unsigned datapoint types represent values from 0 to 255
//! with different scaling and interpretations.
//!
//! ## Scaling
//!
//! - **5.001** Scaling: `value = raw × 100 / 255`
//! - **5.003** Angle: `value = raw × 360 / 255`
//! - every other subtype reads the raw octet
//!
//! The encoder rounds half away from zero, so a round trip through the
//! scaled subtypes is exact to one step (≈0.39 % or ≈1.4°).
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::dpt::{DatapointType, Dpt5, EightBitUnsigned};
//!
//! let mut level = EightBitUnsigned::new(Dpt5::Scaling);
//! assert!(level.set_value(75.0));
//! assert_eq!(level.bytes(), &[0xBF]); // 191
//! assert!(!level.set_value(101.0));
//! ```

use super::round;

dpt_subtypes! {
    /// DPT 5.xxx 8-bit unsigned types
    pub enum Dpt5 {
        /// DPT 5.000 - Generic 8-bit unsigned value (0-255)
        Generic = 0 => ("8-bit unsigned value", "", "0", "255"),
        /// DPT 5.001 - Scaling (0-100%)
        Scaling = 1 => ("Percentage (0..100%)", "%", "0", "100"),
        /// DPT 5.003 - Angle (0-360°)
        Angle = 3 => ("Angle", "°", "0", "360"),
        /// DPT 5.004 - Percentage 0-255 (0-255)
        PercentU8 = 4 => ("Percentage (0..255%)", "%", "0", "255"),
        /// DPT 5.005 - Ratio (0-255)
        Ratio = 5 => ("Ratio (0..255)", "", "0", "255"),
        /// DPT 5.006 - Tariff (0-254)
        Tariff = 6 => ("Tariff (0..254)", "", "0", "254"),
        /// DPT 5.010 - Counter pulses (0-255)
        Counter = 10 => ("Counter pulses (0..255)", "pulses", "0", "255"),
    }
}

impl Dpt5 {
    /// Value range after scaling.
    pub const fn range(self) -> (f64, f64) {
        match self {
            Dpt5::Scaling => (0.0, 100.0),
            Dpt5::Angle => (0.0, 360.0),
            Dpt5::Tariff => (0.0, 254.0),
            Dpt5::Generic | Dpt5::PercentU8 | Dpt5::Ratio | Dpt5::Counter => (0.0, 255.0),
        }
    }

    /// Full-scale value the octet 255 stands for.
    const fn full_scale(self) -> Option<f64> {
        match self {
            Dpt5::Scaling => Some(100.0),
            Dpt5::Angle => Some(360.0),
            _ => None,
        }
    }
}

/// 8-bit unsigned value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EightBitUnsigned {
    subtype: Dpt5,
    data: [u8; 1],
}

impl EightBitUnsigned {
    /// Create a zero value.
    pub const fn new(subtype: Dpt5) -> Self {
        Self { subtype, data: [0] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt5 {
        self.subtype
    }

    /// Raw octet.
    pub const fn raw(&self) -> u8 {
        self.data[0]
    }

    /// Scaled value.
    pub fn value(&self) -> f64 {
        let raw = f64::from(self.data[0]);
        match self.subtype.full_scale() {
            Some(scale) => raw * scale / 255.0,
            None => raw,
        }
    }

    /// Set the scaled value. Out-of-range values are rejected.
    pub fn set_value(&mut self, value: f64) -> bool {
        let (min, max) = self.subtype.range();
        if !(min..=max).contains(&value) {
            return false;
        }
        let raw = match self.subtype.full_scale() {
            Some(scale) => round(value * 255.0 / scale),
            None => round(value),
        };
        self.data[0] = raw as u8;
        true
    }

    fn check(&self) -> bool {
        match self.subtype {
            Dpt5::Tariff => self.data[0] != 0xFF,
            _ => true,
        }
    }
}

impl_datapoint_type!(EightBitUnsigned, 5, 1);
