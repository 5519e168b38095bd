//! DPT 6.xxx - 8-bit signed value

dpt_subtypes! {
    /// DPT 6.xxx 8-bit signed types
    pub enum Dpt6 {
        /// DPT 6.000 - Generic 8-bit signed value
        Generic = 0 => ("8-bit signed value", "", "-128", "127"),
        /// DPT 6.001 - Percentage (-128..127%)
        PercentV8 = 1 => ("Percentage (-128..127%)", "%", "-128", "127"),
        /// DPT 6.010 - Counter pulses (-128..127)
        Value1Count = 10 => ("Counter pulses (-128..127)", "pulses", "-128", "127"),
    }
}

/// 8-bit two's complement value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EightBitSigned {
    subtype: Dpt6,
    data: [u8; 1],
}

impl EightBitSigned {
    /// Create a zero value.
    pub const fn new(subtype: Dpt6) -> Self {
        Self { subtype, data: [0] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt6 {
        self.subtype
    }

    /// Current value.
    pub const fn value(&self) -> i8 {
        self.data[0] as i8
    }

    /// Set the value. The whole `i8` range is allowed.
    pub fn set_value(&mut self, value: i8) -> bool {
        self.data = value.to_be_bytes();
        true
    }

    #[allow(clippy::unused_self, reason = "shared validator signature")]
    fn check(&self) -> bool {
        true
    }
}

impl_datapoint_type!(EightBitSigned, 6, 1);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    #[test]
    fn test_value() {
        let mut dp = EightBitSigned::new(Dpt6::PercentV8);
        dp.set_value(-1);
        assert_eq!(dp.bytes(), &[0xFF]);
        assert!(dp.set_bytes(&[0x80]));
        assert_eq!(dp.value(), -128);
        assert_eq!(dp.unit(), "%");
    }
}
