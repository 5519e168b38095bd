//! DPT 232.600 - RGB colour (3 bytes, red green blue)

dpt_subtypes! {
    /// DPT 232.xxx colour types
    pub enum Dpt232 {
        /// DPT 232.000 - Generic 3-byte colour
        Generic = 0 => ("3-byte colour", "", "0, 0, 0", "255, 255, 255"),
        /// DPT 232.600 - RGB
        Rgb = 600 => ("RGB value 3x(0..255)", "", "0, 0, 0", "255, 255, 255"),
    }
}

/// RGB colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColourRgb {
    subtype: Dpt232,
    data: [u8; 3],
}

impl ColourRgb {
    /// Create black.
    pub const fn new(subtype: Dpt232) -> Self {
        Self { subtype, data: [0; 3] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt232 {
        self.subtype
    }

    /// `(red, green, blue)`
    pub const fn value(&self) -> (u8, u8, u8) {
        (self.data[0], self.data[1], self.data[2])
    }

    /// Set the colour.
    pub fn set_value(&mut self, red: u8, green: u8, blue: u8) -> bool {
        self.data = [red, green, blue];
        true
    }

    #[allow(clippy::unused_self, reason = "shared validator signature")]
    fn check(&self) -> bool {
        true
    }
}

impl_datapoint_type!(ColourRgb, 232, 3);
