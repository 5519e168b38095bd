//! DPT 9.xxx - 2-byte Float (16-bit floating point)
//!
//! 2-byte floating point datapoint types represent values using a custom
//! 16-bit floating point format with 1 sign bit, 4 exponent bits, and 11 mantissa bits.
//!
//! ## Format
//!
//! ```text
//! Byte 0: SEEE EMMM
//! Byte 1: MMMM MMMM
//!
//! S = Sign bit (bit 15)
//! E = Exponent (bits 14-11: 4 bits, unsigned, range 0-15)
//! M = Mantissa (bits 10-0), 11-bit two's complement together with S
//!
//! Value = 0.01 * M * 2^E
//! ```
//!
//! ## Range
//!
//! - Min: -671088.64
//! - Max: +670760.96
//! - Resolution: 0.01 at exponent 0
//!
//! The encoder picks the smallest exponent whose rounded mantissa fits in
//! `[-2048, 2047]`.
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::dpt::{DatapointType, Dpt9, TwoByteFloat};
//!
//! let mut temp = TwoByteFloat::new(Dpt9::Temperature);
//! assert!(temp.set_value(21.5));
//! assert_eq!(temp.bytes(), &[0x0C, 0x33]);
//! assert!(!temp.set_value(-274.0));
//! ```

use super::round;

dpt_subtypes! {
    /// DPT 9.xxx 2-byte float types
    pub enum Dpt9 {
        /// DPT 9.000 - Generic 2-byte float
        Generic = 0 => ("2-byte float", "", "-671088.64", "670760.96"),
        /// DPT 9.001 - Temperature (°C)
        Temperature = 1 => ("Temperature in degree Celsius", "°C", "-273", "670760"),
        /// DPT 9.002 - Temperature difference (K)
        TemperatureDifference = 2 => ("Temperature difference", "K", "-670760", "670760"),
        /// DPT 9.003 - Kelvin per hour (K/h)
        KelvinPerHour = 3 => ("Change in temperature per hour", "K/h", "-670760", "670760"),
        /// DPT 9.004 - Illuminance (lux)
        Illuminance = 4 => ("Brightness in lux", "lux", "0", "670760"),
        /// DPT 9.005 - Wind speed (m/s)
        WindSpeed = 5 => ("Wind speed in meter per second", "m/s", "0", "670760"),
        /// DPT 9.006 - Pressure (Pa)
        Pressure = 6 => ("Pressure in pascal", "Pa", "0", "670760"),
        /// DPT 9.007 - Humidity (%)
        Humidity = 7 => ("Humidity in percent", "%", "0", "670760"),
        /// DPT 9.008 - Air quality (ppm)
        AirQuality = 8 => ("Air quality in ppm", "ppm", "0", "670760"),
        /// DPT 9.009 - Air flow (m³/h)
        AirFlow = 9 => ("Air flow", "m³/h", "-670760", "670760"),
        /// DPT 9.010 - Time difference (s)
        TimeDifference = 10 => ("Time in seconds", "s", "-670760", "670760"),
        /// DPT 9.011 - Time difference (ms)
        TimeDifferenceMs = 11 => ("Time in milliseconds", "ms", "-670760", "670760"),
        /// DPT 9.020 - Voltage (mV)
        Voltage = 20 => ("Voltage", "mV", "-670760", "670760"),
        /// DPT 9.021 - Current (mA)
        Current = 21 => ("Current", "mA", "-670760", "670760"),
        /// DPT 9.022 - Power density (W/m²)
        PowerDensity = 22 => ("Power density", "W/m²", "-670760", "670760"),
        /// DPT 9.023 - Kelvin per percent (K/%)
        KelvinPerPercent = 23 => ("Kelvin per percent", "K/%", "-670760", "670760"),
        /// DPT 9.024 - Power (kW)
        Power = 24 => ("Power", "kW", "-670760", "670760"),
        /// DPT 9.025 - Volume flow (l/h)
        VolumeFlow = 25 => ("Volume flow", "l/h", "-670760", "670760"),
        /// DPT 9.026 - Amount of rain (l/m²)
        AmountRain = 26 => ("Amount of rain", "l/m²", "-671088.64", "670760.96"),
        /// DPT 9.027 - Temperature (°F)
        TemperatureFahrenheit = 27 =>
            ("Temperature in degree Fahrenheit", "°F", "-459.6", "670760.96"),
        /// DPT 9.028 - Wind speed (km/h)
        WindSpeedKmh = 28 => ("Wind speed in kilometer per hour", "km/h", "0", "670760.96"),
    }
}

impl Dpt9 {
    /// Allowed value range.
    pub const fn range(self) -> (f32, f32) {
        match self {
            Dpt9::Generic | Dpt9::AmountRain => (-671_088.64, 670_760.96),
            Dpt9::Temperature => (-273.0, 670_760.0),
            Dpt9::TemperatureFahrenheit => (-459.6, 670_760.96),
            Dpt9::WindSpeedKmh => (0.0, 670_760.96),
            Dpt9::Illuminance
            | Dpt9::WindSpeed
            | Dpt9::Pressure
            | Dpt9::Humidity
            | Dpt9::AirQuality => (0.0, 670_760.0),
            _ => (-670_760.0, 670_760.0),
        }
    }
}

/// Encode a value into the 16-bit float layout.
///
/// Returns `None` for non-finite input or when no exponent in 0..=15 fits the mantissa.
pub fn encode(value: f32) -> Option<[u8; 2]> {
    if !value.is_finite() {
        return None;
    }
    let scaled = f64::from(value) * 100.0;
    let mut exponent = 0u16;
    let mut mantissa = round(scaled);
    while !(-2048.0..=2047.0).contains(&mantissa) {
        exponent += 1;
        if exponent > 15 {
            return None;
        }
        mantissa = round(scaled / f64::from(1u32 << exponent));
    }

    Some(pack(mantissa as i16, exponent))
}

fn pack(mantissa: i16, exponent: u16) -> [u8; 2] {
    ((mantissa as u16 & 0x87FF) | (exponent << 11)).to_be_bytes()
}

fn unpack(bytes: [u8; 2]) -> (i32, u16) {
    let raw = u16::from_be_bytes(bytes);
    let mut mantissa = i32::from(raw & 0x07FF);
    if raw & 0x8000 != 0 {
        mantissa -= 2048;
    }
    (mantissa, (raw >> 11) & 0x0F)
}

/// Move the mantissa one step towards zero, keeping the exponent.
fn step_towards_zero(bytes: [u8; 2]) -> [u8; 2] {
    let (mantissa, exponent) = unpack(bytes);
    pack((mantissa - mantissa.signum()) as i16, exponent)
}

/// Decode the 16-bit float layout.
pub fn decode(bytes: [u8; 2]) -> f32 {
    let (mantissa, exponent) = unpack(bytes);
    (f64::from(mantissa) * f64::from(1u32 << exponent) / 100.0) as f32
}

/// 2-byte float value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoByteFloat {
    subtype: Dpt9,
    data: [u8; 2],
}

impl TwoByteFloat {
    /// Create a zero value.
    pub const fn new(subtype: Dpt9) -> Self {
        Self { subtype, data: [0; 2] }
    }

    /// Subtype of this value.
    pub const fn subtype(&self) -> Dpt9 {
        self.subtype
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        decode(self.data)
    }

    /// Set the value. Values outside the subtype range are rejected.
    ///
    /// A value whose rounded encoding lands just past a limit is stored one
    /// mantissa step closer to zero.
    pub fn set_value(&mut self, value: f32) -> bool {
        let (min, max) = self.subtype.range();
        if !(min..=max).contains(&value) {
            return false;
        }
        let Some(mut data) = encode(value) else {
            return false;
        };
        if !(min..=max).contains(&decode(data)) {
            data = step_towards_zero(data);
            if !(min..=max).contains(&decode(data)) {
                return false;
            }
        }
        self.data = data;
        true
    }

    fn check(&self) -> bool {
        let (min, max) = self.subtype.range();
        (min..=max).contains(&self.value())
    }
}

impl_datapoint_type!(TwoByteFloat, 9, 2);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::DatapointType;

    fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
        assert!(
            (a - b).abs() < epsilon,
            "Expected {} ≈ {}, diff = {}",
            a,
            b,
            (a - b).abs()
        );
    }

    #[test]
    fn test_encode_zero() {
        let mut dp = TwoByteFloat::new(Dpt9::Temperature);
        assert!(dp.set_value(0.0));
        assert_eq!(dp.bytes(), &[0x00, 0x00]);
        assert_eq!(dp.value(), 0.0);
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(21.5), Some([0x0C, 0x33]));
        assert_eq!(encode(20.47), Some([0x07, 0xFF]));
        // +20.48 overflows the mantissa at exponent 0
        assert_eq!(encode(20.48), Some([0x0C, 0x00]));
        assert_eq!(encode(-20.48), Some([0x80, 0x00]));
        assert_eq!(encode(-0.01), Some([0x87, 0xFF]));
    }

    #[test]
    fn test_encode_negative() {
        let mut dp = TwoByteFloat::new(Dpt9::Temperature);
        assert!(dp.set_value(-5.2));
        assert_float_eq(dp.value(), -5.2, 0.01);
        assert_ne!(dp.bytes()[0] & 0x80, 0);
    }

    #[test]
    fn test_temperature_limits() {
        let mut dp = TwoByteFloat::new(Dpt9::Temperature);
        assert!(dp.set_value(-273.0));
        assert_float_eq(dp.value(), -272.96, 0.001);
        assert!(!dp.set_value(-273.5));
        assert_float_eq(dp.value(), -272.96, 0.001);
        assert!(!dp.set_value(670_761.0));
    }

    #[test]
    fn test_generic_extremes() {
        let mut dp = TwoByteFloat::new(Dpt9::Generic);
        assert!(dp.set_value(670_760.96));
        assert_eq!(dp.bytes(), &[0x7F, 0xFF]);
        assert!(dp.set_value(-671_088.64));
        assert_eq!(dp.bytes(), &[0xF8, 0x00]);
        assert!(!dp.set_value(f32::NAN));
        assert!(!dp.set_value(700_000.0));
    }

    #[test]
    fn test_subtype_ranges() {
        let mut dp = TwoByteFloat::new(Dpt9::Humidity);
        assert!(!dp.set_value(-1.0));
        assert!(dp.set_value(65.5));
        assert_float_eq(dp.value(), 65.5, 0.5);

        let mut rain = TwoByteFloat::new(Dpt9::AmountRain);
        assert!(rain.set_value(-671_088.64));
    }

    #[test]
    fn test_decoded_out_of_range_is_invalid() {
        let mut dp = TwoByteFloat::new(Dpt9::Illuminance);
        // -1.00
        assert!(!dp.set_bytes(&[0x87, 0x9C]));
        assert!(!dp.is_valid());
    }

    #[test]
    fn test_every_subtype_accepts_its_limits() {
        for &subtype in Dpt9::ALL {
            let (min, max) = subtype.range();
            let mut dp = TwoByteFloat::new(subtype);
            assert!(dp.set_value(max));
            assert!(dp.is_valid());
            assert!(dp.value() <= max);
            assert!(dp.set_value(min));
            assert!(dp.is_valid());
            assert!(dp.value() >= min);
        }
    }

    #[test]
    fn test_temperature_max_steps_inside_range() {
        let mut dp = TwoByteFloat::new(Dpt9::Temperature);
        assert!(dp.set_value(670_760.0));
        assert_eq!(dp.bytes(), &[0x7F, 0xFE]);
        assert!(dp.is_valid());
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert_eq!(encode(f32::NAN), None);
        assert_eq!(encode(f32::INFINITY), None);
        assert_eq!(encode(f32::NEG_INFINITY), None);
    }

    #[test]
    fn test_round_trip_large_value() {
        let mut dp = TwoByteFloat::new(Dpt9::Pressure);
        assert!(dp.set_value(100_000.0));
        assert_float_eq(dp.value(), 100_000.0, 500.0);
    }
}
