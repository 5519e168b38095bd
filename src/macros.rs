//! Address literal macros.
//!
//! `ga!` and `ia!` build addresses from their usual notation and reject
//! out-of-range sections at compile time.

/// Creates a [`GroupAddress`](crate::addressing::GroupAddress) from 3-level notation.
///
/// ```
/// use knx_ip_core::{ga, GroupAddress};
///
/// let addr = ga!(1/2/3);
/// assert_eq!(addr, GroupAddress::from(0x0A03));
/// ```
///
/// ```compile_fail
/// // main group > 31
/// let addr = knx_ip_core::ga!(32/0/0);
/// ```
///
/// ```compile_fail
/// // middle group > 7
/// let addr = knx_ip_core::ga!(1/8/0);
/// ```
#[macro_export]
macro_rules! ga {
    ($main:literal / $middle:literal / $sub:literal) => {{
        const _: () = {
            if $main > 31 {
                panic!("Main group must be 0-31");
            }
            if $middle > 7 {
                panic!("Middle group must be 0-7");
            }
            if $sub > 255 {
                panic!("Sub group must be 0-255");
            }
        };

        const RAW: u16 = (($main & 0x1F) << 11) | (($middle & 0x07) << 8) | ($sub & 0xFF);
        $crate::addressing::GroupAddress::from(RAW)
    }};
}

/// Creates an [`IndividualAddress`](crate::addressing::IndividualAddress) from
/// `area.line.device` notation.
///
/// The tokenizer reads `1.1` as a float literal, so sections are separated
/// by commas inside the macro:
///
/// ```
/// use knx_ip_core::{ia, IndividualAddress};
///
/// let addr = ia!(1, 1, 5);
/// assert_eq!(addr, IndividualAddress::from(0x1105));
/// ```
///
/// ```compile_fail
/// // area > 15
/// let addr = knx_ip_core::ia!(16, 0, 0);
/// ```
#[macro_export]
macro_rules! ia {
    ($area:literal, $line:literal, $device:literal) => {{
        const _: () = {
            if $area > 15 {
                panic!("Area must be 0-15");
            }
            if $line > 15 {
                panic!("Line must be 0-15");
            }
            if $device > 255 {
                panic!("Device must be 0-255");
            }
        };

        const RAW: u16 = (($area & 0x0F) << 12) | (($line & 0x0F) << 8) | ($device & 0xFF);
        $crate::addressing::IndividualAddress::from(RAW)
    }};
}

#[cfg(test)]
mod tests {
    use crate::addressing::{GroupAddress, IndividualAddress};

    #[test]
    fn test_ga_macro() {
        assert_eq!(ga!(1 / 2 / 3), GroupAddress::from(0x0A03));
        assert_eq!(ga!(0 / 0 / 1), GroupAddress::from(0x0001));
        assert_eq!(ga!(5 / 3 / 100), GroupAddress::from(0x2B64));
        assert_eq!(ga!(31 / 7 / 255), GroupAddress::from(0xFFFF));
    }

    #[test]
    fn test_ia_macro() {
        assert_eq!(ia!(1, 1, 1), IndividualAddress::from(0x1101));
        assert_eq!(ia!(15, 15, 255), IndividualAddress::from(0xFFFF));
        assert_eq!(ia!(2, 3, 8).to_string(), "2.3.8");
    }
}
