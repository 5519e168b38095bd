//! KNX addresses DIB.

use alloc::vec::Vec;

use crate::addressing::IndividualAddress;
use crate::protocol::constants::DescriptionType;
use crate::protocol::structure::{knx_struct, KnxNetIpStruct};

knx_struct!(
    /// Individual addresses assigned to a KNXnet/IP server.
    ///
    /// ```
    /// use knx_ip_core::protocol::dib::KnxAddressesDib;
    /// use knx_ip_core::IndividualAddress;
    ///
    /// let dib = KnxAddressesDib::new(&[
    ///     IndividualAddress::new(1, 1, 0).unwrap(),
    ///     IndividualAddress::new(1, 2, 5).unwrap(),
    ///     IndividualAddress::new(2, 3, 8).unwrap(),
    /// ]);
    /// assert_eq!(dib.bytes(), [0x08, 0x05, 0x11, 0x00, 0x12, 0x05, 0x23, 0x08]);
    /// ```
    KnxAddressesDib,
    DescriptionType
);

impl KnxAddressesDib {
    /// Most addresses a one-octet length can describe.
    pub const MAX_ADDRESSES: usize = KnxNetIpStruct::MAX_PAYLOAD_SIZE / 2;

    /// Build from `addresses`. More than [`Self::MAX_ADDRESSES`] yields an
    /// empty, invalid DIB.
    pub fn new(addresses: &[IndividualAddress]) -> Self {
        if addresses.len() > Self::MAX_ADDRESSES {
            return Self::default();
        }
        let payload: Vec<u8> = addresses.iter().flat_map(IndividualAddress::bytes).collect();
        Self::with_payload(DescriptionType::KnxAddresses, &payload)
    }

    /// Listed addresses in wire order.
    pub fn individual_addresses(&self) -> Vec<IndividualAddress> {
        self.payload()
            .chunks_exact(2)
            .map(|pair| IndividualAddress::from(u16::from_be_bytes([pair[0], pair[1]])))
            .collect()
    }

    /// At least one address, even payload and the KNX addresses code.
    pub fn is_valid(&self) -> bool {
        self.as_struct().is_valid()
            && self.size() >= 4
            && self.size() % 2 == 0
            && self.code() == Some(DescriptionType::KnxAddresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let dib = KnxAddressesDib::new(&[IndividualAddress::new(1, 1, 1).unwrap()]);
        assert!(dib.is_valid());
        assert_eq!(dib.bytes(), [0x04, 0x05, 0x11, 0x01]);
        assert_eq!(dib.payload(), &[0x11, 0x01]);
    }

    #[test]
    fn test_individual_addresses() {
        let bytes = [0x08, 0x05, 0x11, 0x00, 0x12, 0x05, 0x23, 0x08];
        let dib = KnxAddressesDib::from_bytes(&bytes, 0);
        let addresses = dib.individual_addresses();
        assert_eq!(addresses.len(), 3);
        assert_eq!(addresses[0].to_string(), "1.1.0");
        assert_eq!(addresses[1].to_string(), "1.2.5");
        assert_eq!(addresses[2].to_string(), "2.3.8");
    }

    #[test]
    fn test_invalid() {
        let dib = KnxAddressesDib::default();
        assert!(!dib.is_valid());
        assert_eq!(dib.size(), 0);
        assert!(dib.bytes().is_empty());
        assert_eq!(dib.code(), None);
        assert!(!KnxAddressesDib::new(&[]).is_valid());
        assert!(!KnxAddressesDib::from_bytes(&[0x05, 0x05, 0x11, 0x01, 0x02], 0).is_valid());
    }
}
