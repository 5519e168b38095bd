//! Group communication services.
//!
//! Values of at most six bits travel in the APCI octet (`*_short`);
//! larger values follow it.

use super::super::tpdu::{Apci, Tpci, Tpdu};

/// `A_GroupValue_Read`
pub fn group_value_read() -> Tpdu {
    Tpdu::new(Tpci::DataGroup, Apci::GroupValueRead, 0, &[])
}

/// `A_GroupValue_Write` with data following the APCI.
pub fn group_value_write(data: &[u8]) -> Tpdu {
    Tpdu::new(Tpci::DataGroup, Apci::GroupValueWrite, 0, data)
}

/// `A_GroupValue_Write` with a value of at most six bits.
pub fn group_value_write_short(value: u8) -> Tpdu {
    Tpdu::with_apci_data(Tpci::DataGroup, Apci::GroupValueWrite, 0, value, &[])
}

/// `A_GroupValue_Response` with data following the APCI.
pub fn group_value_response(data: &[u8]) -> Tpdu {
    Tpdu::new(Tpci::DataGroup, Apci::GroupValueResponse, 0, data)
}

/// `A_GroupValue_Response` with a value of at most six bits.
pub fn group_value_response_short(value: u8) -> Tpdu {
    Tpdu::with_apci_data(Tpci::DataGroup, Apci::GroupValueResponse, 0, value, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_value_read() {
        assert_eq!(group_value_read().bytes(), [0x00, 0x00]);
    }

    #[test]
    fn test_short_and_long_writes() {
        assert_eq!(group_value_write_short(0x3F).bytes(), [0x00, 0xBF]);
        assert!(!group_value_write_short(0x40).is_valid());
        assert_eq!(group_value_write(&[0x0C, 0x33]).bytes(), [0x00, 0x80, 0x0C, 0x33]);
    }

    #[test]
    fn test_responses() {
        assert_eq!(group_value_response_short(0x01).bytes(), [0x00, 0x41]);
        assert_eq!(group_value_response(&[0xFF]).bytes(), [0x00, 0x40, 0xFF]);
        assert!(!group_value_response(&[0; 255]).is_valid());
    }
}
