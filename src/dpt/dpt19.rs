//! DPT 19.001 - Date and time (8 bytes)
//!
//! ```text
//! Byte 0: YYYY YYYY   year - 1900
//! Byte 1: 0000 MMMM   month 1-12
//! Byte 2: WWWD DDDD   day of week, day of month 1-31
//! Byte 3: 000H HHHH   hour 0-24
//! Byte 4: 00MM MMMM   minutes 0-59
//! Byte 5: 00SS SSSS   seconds 0-59
//! Byte 6: flags       F WD NWD NY ND NDoW NT SUTI
//! Byte 7: clock       CLQ SRC 0000 00
//! ```
//!
//! Hour 24 is only allowed as `24:00:00`. Date fields are not checked when
//! the `NO_DATE` flag is set, time fields not when `NO_TIME` is set.

use bitflags::bitflags;

use super::dpt10::DayOfWeek;
use super::dpt11::days_in_month;

dpt_subtypes! {
    /// DPT 19.xxx date-time types
    pub enum Dpt19 {
        /// DPT 19.000 - Generic date and time
        Generic = 0 => ("Date time", "", "1900-01-01 00:00:00", "2155-12-31 24:00:00"),
        /// DPT 19.001 - Date and time
        DateTime = 1 => ("Date time", "", "1900-01-01 00:00:00", "2155-12-31 24:00:00"),
    }
}

bitflags! {
    /// Qualifier flags in octet 6.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DateTimeFlags: u8 {
        /// Clock fault
        const FAULT = 0x80;
        /// Working day
        const WORKING_DAY = 0x40;
        /// Working day field not valid
        const NO_WORKING_DAY = 0x20;
        /// Year field not valid
        const NO_YEAR = 0x10;
        /// Month and day fields not valid
        const NO_DATE = 0x08;
        /// Day of week field not valid
        const NO_DAY_OF_WEEK = 0x04;
        /// Time fields not valid
        const NO_TIME = 0x02;
        /// Summer time
        const SUMMER_TIME = 0x01;
    }
}

bitflags! {
    /// Clock quality bits in octet 7.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ClockQuality: u8 {
        /// Clock with external synchronisation signal
        const EXTERNAL_SYNC = 0x80;
        /// Reliable synchronisation source
        const RELIABLE_SYNC_SOURCE = 0x40;
    }
}

/// Date, time and qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTime {
    subtype: Dpt19,
    data: [u8; 8],
}

impl DateTime {
    /// Create an unset value. All-zero octets are not a valid date.
    pub const fn new(subtype: Dpt19) -> Self {
        Self { subtype, data: [0; 8] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt19 {
        self.subtype
    }

    /// Full year (1900..=2155).
    pub const fn year(&self) -> u16 {
        1900 + self.data[0] as u16
    }

    /// Month.
    pub const fn month(&self) -> u8 {
        self.data[1] & 0x0F
    }

    /// Day of month.
    pub const fn day(&self) -> u8 {
        self.data[2] & 0x1F
    }

    /// Day of week.
    pub const fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::from_bits(self.data[2] >> 5)
    }

    /// Hour (0..=24).
    pub const fn hour(&self) -> u8 {
        self.data[3] & 0x1F
    }

    /// Minute.
    pub const fn minute(&self) -> u8 {
        self.data[4] & 0x3F
    }

    /// Second.
    pub const fn second(&self) -> u8 {
        self.data[5] & 0x3F
    }

    /// Qualifier flags.
    pub const fn flags(&self) -> DateTimeFlags {
        DateTimeFlags::from_bits_retain(self.data[6])
    }

    /// Clock quality bits.
    pub const fn clock_quality(&self) -> ClockQuality {
        ClockQuality::from_bits_truncate(self.data[7])
    }

    /// `(year, month, day, hour, minute, second)`
    pub const fn value(&self) -> (u16, u8, u8, u8, u8, u8) {
        (self.year(), self.month(), self.day(), self.hour(), self.minute(), self.second())
    }

    /// Set date and time, keeping day of week and qualifiers.
    pub fn set_value(
        &mut self,
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> bool {
        if !(1900..=2155).contains(&year)
            || day == 0
            || day > days_in_month(year, month)
            || !Self::time_in_range(hour, minute, second)
        {
            return false;
        }
        self.data[0] = (year - 1900) as u8;
        self.data[1] = month;
        self.data[2] = (self.data[2] & 0xE0) | day;
        self.data[3] = hour;
        self.data[4] = minute;
        self.data[5] = second;
        true
    }

    /// Set day of week.
    pub fn set_day_of_week(&mut self, day: DayOfWeek) {
        self.data[2] = ((day as u8) << 5) | (self.data[2] & 0x1F);
    }

    /// Set qualifier flags.
    pub fn set_flags(&mut self, flags: DateTimeFlags) {
        self.data[6] = flags.bits();
    }

    /// Set clock quality bits.
    pub fn set_clock_quality(&mut self, quality: ClockQuality) {
        self.data[7] = quality.bits();
    }

    const fn time_in_range(hour: u8, minute: u8, second: u8) -> bool {
        if hour == 24 {
            minute == 0 && second == 0
        } else {
            hour < 24 && minute <= 59 && second <= 59
        }
    }

    fn check(&self) -> bool {
        let d = &self.data;
        let reserved_clear = d[1] & 0xF0 == 0
            && d[3] & 0xE0 == 0
            && d[4] & 0xC0 == 0
            && d[5] & 0xC0 == 0
            && d[7] & 0x3F == 0;
        if !reserved_clear {
            return false;
        }

        let flags = self.flags();
        let date_ok = flags.contains(DateTimeFlags::NO_DATE)
            || (self.day() >= 1 && self.day() <= days_in_month(self.year(), self.month()));
        let time_ok = flags.contains(DateTimeFlags::NO_TIME)
            || Self::time_in_range(self.hour(), self.minute(), self.second());
        date_ok && time_ok
    }
}

impl_datapoint_type!(DateTime, 19, 8);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    #[test]
    fn test_set_value() {
        let mut dp = DateTime::new(Dpt19::DateTime);
        assert!(dp.set_value(2024, 3, 15, 12, 30, 45));
        dp.set_day_of_week(DayOfWeek::Friday);
        dp.set_flags(DateTimeFlags::WORKING_DAY | DateTimeFlags::SUMMER_TIME);
        dp.set_clock_quality(ClockQuality::EXTERNAL_SYNC);
        assert_eq!(dp.bytes(), &[124, 3, 0xAF, 12, 30, 45, 0x41, 0x80]);
        assert!(dp.is_valid());
        assert_eq!(dp.value(), (2024, 3, 15, 12, 30, 45));
        assert_eq!(dp.day_of_week(), DayOfWeek::Friday);
    }

    #[test]
    fn test_hour_24() {
        let mut dp = DateTime::new(Dpt19::DateTime);
        assert!(dp.set_value(2000, 1, 1, 24, 0, 0));
        assert!(!dp.set_value(2000, 1, 1, 24, 0, 1));
        assert!(!dp.set_value(2000, 1, 1, 24, 1, 0));
        assert_eq!(dp.hour(), 24);
    }

    #[test]
    fn test_zero_bytes_invalid() {
        let mut dp = DateTime::new(Dpt19::Generic);
        assert!(!dp.is_valid());
        assert!(!dp.set_bytes(&[0; 8]));
        // Same octets with NO_DATE only need a valid time
        assert!(dp.set_bytes(&[0, 0, 0, 0, 0, 0, 0x08, 0]));
    }

    #[test]
    fn test_reserved_bits() {
        let mut dp = DateTime::new(Dpt19::Generic);
        assert!(!dp.set_bytes(&[100, 1, 1, 0, 0, 0, 0, 0x01]));
        assert!(dp.set_bytes(&[100, 1, 1, 0, 0, 0, 0, 0x40]));
        assert_eq!(dp.clock_quality(), ClockQuality::RELIABLE_SYNC_SOURCE);
    }
}
