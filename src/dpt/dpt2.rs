//! DPT 2.xxx - 1-bit controlled
//!
//! A boolean with a priority control bit. The control bit tells the
//! receiver whether the value overrides normal operation.
//!
//! ## Format
//!
//! ```text
//! 0000 00CV
//! C = control, V = value
//! ```

dpt_subtypes! {
    /// DPT 2.xxx 1-bit controlled types
    pub enum Dpt2 {
        /// DPT 2.000 - Generic 1-bit controlled value
        Generic = 0 => ("1-bit controlled", "", "no control, false", "control, true"),
        /// DPT 2.001 - Switch control
        SwitchControl = 1 => ("Switch control", "", "no control, off", "control, on"),
        /// DPT 2.002 - Bool control
        BoolControl = 2 => ("Boolean control", "", "no control, false", "control, true"),
        /// DPT 2.003 - Enable control
        EnableControl = 3 => ("Enable control", "", "no control, disable", "control, enable"),
        /// DPT 2.004 - Ramp control
        RampControl = 4 => ("Ramp control", "", "no control, no ramp", "control, ramp"),
        /// DPT 2.005 - Alarm control
        AlarmControl = 5 => ("Alarm control", "", "no control, no alarm", "control, alarm"),
        /// DPT 2.006 - Binary value control
        BinaryValueControl = 6 => ("Binary value control", "", "no control, low", "control, high"),
        /// DPT 2.007 - Step control
        StepControl = 7 => ("Step control", "", "no control, decrease", "control, increase"),
        /// DPT 2.008 - Direction 1 control (up/down)
        Direction1Control = 8 => ("Direction 1 control", "", "no control, up", "control, down"),
        /// DPT 2.009 - Direction 2 control (open/close)
        Direction2Control = 9 => ("Direction 2 control", "", "no control, open", "control, close"),
        /// DPT 2.010 - Start control
        StartControl = 10 => ("Start control", "", "no control, stop", "control, start"),
        /// DPT 2.011 - State control
        StateControl = 11 => ("State control", "", "no control, inactive", "control, active"),
        /// DPT 2.012 - Invert control
        InvertControl = 12 =>
            ("Invert control", "", "no control, not inverted", "control, inverted"),
    }
}

/// 1-bit value with control bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneBitControlled {
    subtype: Dpt2,
    data: [u8; 1],
}

impl OneBitControlled {
    const CONTROL: u8 = 0x02;
    const VALUE: u8 = 0x01;

    /// Create an uncontrolled `false` value.
    pub const fn new(subtype: Dpt2) -> Self {
        Self { subtype, data: [0] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt2 {
        self.subtype
    }

    /// `(control, value)`
    pub const fn value(&self) -> (bool, bool) {
        (self.control(), self.data[0] & Self::VALUE != 0)
    }

    /// Control bit.
    pub const fn control(&self) -> bool {
        self.data[0] & Self::CONTROL != 0
    }

    /// Set control and value bits.
    pub fn set_value(&mut self, control: bool, value: bool) -> bool {
        let mut byte = 0;
        if control {
            byte |= Self::CONTROL;
        }
        if value {
            byte |= Self::VALUE;
        }
        self.data[0] = byte;
        true
    }

    fn check(&self) -> bool {
        self.data[0] & 0xFC == 0
    }
}

impl_datapoint_type!(OneBitControlled, 2, 1);
