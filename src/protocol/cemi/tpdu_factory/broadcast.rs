//! Broadcast services for individual address assignment.

use super::super::tpdu::{Apci, Tpci, Tpdu};
use crate::addressing::KnxAddress;

/// `A_IndividualAddress_Read`
pub fn individual_address_read() -> Tpdu {
    Tpdu::new(Tpci::DataBroadcast, Apci::IndividualAddressRead, 0, &[])
}

/// `A_IndividualAddress_Write`, `address` must be an individual address.
pub fn individual_address_write(address: KnxAddress) -> Tpdu {
    if !address.is_individual() {
        return Tpdu::invalid();
    }
    Tpdu::new(Tpci::DataBroadcast, Apci::IndividualAddressWrite, 0, &address.bytes())
}

/// `A_IndividualAddress_Response`. The answer is the frame's source address.
pub fn individual_address_response() -> Tpdu {
    Tpdu::new(Tpci::DataBroadcast, Apci::IndividualAddressResponse, 0, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_address_services() {
        assert_eq!(individual_address_read().bytes(), [0x01, 0x00]);
        assert_eq!(individual_address_response().bytes(), [0x01, 0x40]);

        let write = individual_address_write(KnxAddress::individual(0x1105));
        assert_eq!(write.bytes(), [0x00, 0xC0, 0x11, 0x05]);
        assert_eq!(write.tpci(), Tpci::DataBroadcast);
    }

    #[test]
    fn test_group_address_rejected() {
        assert!(!individual_address_write(KnxAddress::group(0x0A03)).is_valid());
    }
}
