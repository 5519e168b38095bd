//! Manufacturer data DIB.

use crate::codec;
use crate::protocol::constants::DescriptionType;
use crate::protocol::structure::{knx_struct, KnxNetIpStruct};

knx_struct!(
    /// Manufacturer id followed by manufacturer-specific bytes.
    ManufacturerDataDib,
    DescriptionType
);

impl ManufacturerDataDib {
    /// Length, code and manufacturer id.
    pub const MIN_SIZE: usize = 4;

    /// Build the DIB. Data that does not fit yields an empty, invalid DIB.
    pub fn new(manufacturer_id: u16, data: &[u8]) -> Self {
        if data.len() + 2 > KnxNetIpStruct::MAX_PAYLOAD_SIZE {
            return Self::default();
        }
        let mut payload = codec::u16_to_bytes(manufacturer_id).to_vec();
        payload.extend_from_slice(data);
        Self::with_payload(DescriptionType::ManufacturerData, &payload)
    }

    /// KNX manufacturer id.
    pub fn manufacturer_id(&self) -> u16 {
        codec::u16_from_bytes(self.payload(), 0).unwrap_or(0)
    }

    /// Manufacturer-specific bytes.
    pub fn manufacturer_data(&self) -> &[u8] {
        self.payload().get(2..).unwrap_or(&[])
    }

    /// At least the manufacturer id with the manufacturer data code.
    pub fn is_valid(&self) -> bool {
        self.as_struct().is_valid()
            && self.size() >= Self::MIN_SIZE
            && self.code() == Some(DescriptionType::ManufacturerData)
    }
}
