//! DPT 10.001 - Time of day (3 bytes)
//!
//! ```text
//! Byte 0: DDDH HHHH   day of week (0 = no day), hour 0-23
//! Byte 1: 00MM MMMM   minutes 0-59
//! Byte 2: 00SS SSSS   seconds 0-59
//! ```

dpt_subtypes! {
    /// DPT 10.xxx time types
    pub enum Dpt10 {
        /// DPT 10.000 - Generic time of day
        Generic = 0 => ("Time of day", "", "No day, 00:00:00", "Sunday, 23:59:59"),
        /// DPT 10.001 - Time of day
        TimeOfDay = 1 => ("Time of day", "", "No day, 00:00:00", "Sunday, 23:59:59"),
    }
}

/// Day of week as carried by DPT 10 and DPT 19.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DayOfWeek {
    /// No day given, or any day
    #[default]
    Ignore = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl DayOfWeek {
    /// Decode the three day bits.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            7 => Self::Sunday,
            _ => Self::Ignore,
        }
    }
}

/// Time of day with optional day of week.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay {
    subtype: Dpt10,
    data: [u8; 3],
}

impl TimeOfDay {
    /// Create `00:00:00` without day.
    pub const fn new(subtype: Dpt10) -> Self {
        Self { subtype, data: [0; 3] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt10 {
        self.subtype
    }

    /// Day of week.
    pub const fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::from_bits(self.data[0] >> 5)
    }

    /// Hour field.
    pub const fn hour(&self) -> u8 {
        self.data[0] & 0x1F
    }

    /// Minute field.
    pub const fn minute(&self) -> u8 {
        self.data[1] & 0x3F
    }

    /// Second field.
    pub const fn second(&self) -> u8 {
        self.data[2] & 0x3F
    }

    /// `(day, hour, minute, second)`
    pub const fn value(&self) -> (DayOfWeek, u8, u8, u8) {
        (self.day_of_week(), self.hour(), self.minute(), self.second())
    }

    /// Set day and time. Hour must be below 24, minute and second below 60.
    pub fn set_value(&mut self, day: DayOfWeek, hour: u8, minute: u8, second: u8) -> bool {
        if hour > 23 || minute > 59 || second > 59 {
            return false;
        }
        self.data = [((day as u8) << 5) | hour, minute, second];
        true
    }

    fn check(&self) -> bool {
        self.data[1] & 0xC0 == 0
            && self.data[2] & 0xC0 == 0
            && self.hour() <= 23
            && self.minute() <= 59
            && self.second() <= 59
    }
}

impl_datapoint_type!(TimeOfDay, 10, 3);
