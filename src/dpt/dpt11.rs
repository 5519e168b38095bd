//! DPT 11.001 - Date (3 bytes)
//!
//! ```text
//! Byte 0: 000D DDDD   day 1-31
//! Byte 1: 0000 MMMM   month 1-12
//! Byte 2: 0YYY YYYY   year 0-99
//! ```
//!
//! Years 90..=99 are 1990..=1999, years 0..=89 are 2000..=2089.

dpt_subtypes! {
    /// DPT 11.xxx date types
    pub enum Dpt11 {
        /// DPT 11.000 - Generic date
        Generic = 0 => ("Date", "", "1990-01-01", "2089-12-31"),
        /// DPT 11.001 - Date
        Date = 1 => ("Date", "", "1990-01-01", "2089-12-31"),
    }
}

/// Number of days in `month` of `year`, 0 for an invalid month.
pub(crate) const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => 0,
    }
}

/// Calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    subtype: Dpt11,
    data: [u8; 3],
}

impl Date {
    /// Create an unset date. All-zero octets are not a valid date.
    pub const fn new(subtype: Dpt11) -> Self {
        Self { subtype, data: [0; 3] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt11 {
        self.subtype
    }

    /// Day of month.
    pub const fn day(&self) -> u8 {
        self.data[0] & 0x1F
    }

    /// Month.
    pub const fn month(&self) -> u8 {
        self.data[1] & 0x0F
    }

    /// Full year.
    pub const fn year(&self) -> u16 {
        let short = (self.data[2] & 0x7F) as u16;
        if short >= 90 {
            1900 + short
        } else {
            2000 + short
        }
    }

    /// `(year, month, day)`
    pub const fn value(&self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    /// Set the date. Rejects years outside 1990..=2089 and dates that do
    /// not exist in the calendar.
    pub fn set_value(&mut self, year: u16, month: u8, day: u8) -> bool {
        if !(1990..=2089).contains(&year) || day == 0 || day > days_in_month(year, month) {
            return false;
        }
        self.data = [day, month, (year % 100) as u8];
        true
    }

    fn check(&self) -> bool {
        let [day, month, year] = self.data;
        day & 0xE0 == 0
            && month & 0xF0 == 0
            && year <= 99
            && self.day() >= 1
            && self.day() <= days_in_month(self.year(), self.month())
    }
}

impl_datapoint_type!(Date, 11, 3);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    #[test]
    fn test_century_mapping() {
        let mut dp = Date::new(Dpt11::Date);
        assert!(dp.set_value(1995, 6, 15));
        assert_eq!(dp.bytes(), &[15, 6, 95]);
        assert!(dp.set_value(2024, 2, 29));
        assert_eq!(dp.bytes(), &[29, 2, 24]);
        assert_eq!(dp.value(), (2024, 2, 29));
    }

    #[test]
    fn test_rejects_invalid_dates() {
        let mut dp = Date::new(Dpt11::Date);
        assert!(!dp.set_value(1989, 1, 1));
        assert!(!dp.set_value(2090, 1, 1));
        assert!(!dp.set_value(2023, 2, 29));
        assert!(!dp.set_value(2024, 13, 1));
        assert!(!dp.set_value(2024, 4, 31));
        assert!(!dp.set_value(2024, 4, 0));
    }

    #[test]
    fn test_zero_bytes_invalid() {
        let dp = Date::new(Dpt11::Generic);
        assert!(!dp.is_valid());
        let mut dp = dp;
        assert!(!dp.set_bytes(&[0, 0, 0]));
        assert!(dp.set_bytes(&[1, 1, 0]));
        assert_eq!(dp.year(), 2000);
        assert!(!dp.set_bytes(&[1, 1, 100]));
    }
}
