//! Description information blocks (DIB).
//!
//! Search and description responses carry a sequence of DIBs, each a
//! length/code structure. [`Dib`] dispatches on the code octet.

pub mod device_info;
pub mod ip_config;
pub mod knx_addresses;
pub mod manufacturer_data;
pub mod service_families;

use alloc::vec::Vec;

pub use device_info::{DeviceInfo, DeviceInfoDib, DeviceName};
pub use ip_config::{CurrentIpConfigDib, IpAssignmentMethods, IpCapabilities, IpConfigDib};
pub use knx_addresses::KnxAddressesDib;
pub use manufacturer_data::ManufacturerDataDib;
pub use service_families::ServiceFamiliesDib;

use crate::protocol::constants::DescriptionType;
use crate::protocol::structure::KnxNetIpStruct;

/// Any DIB, typed by its description type code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dib {
    /// Device hardware information
    DeviceInfo(DeviceInfoDib),
    /// Supported service families
    SupportedServiceFamilies(ServiceFamiliesDib),
    /// Configured IP parameters
    IpConfig(IpConfigDib),
    /// IP parameters in use
    CurrentIpConfig(CurrentIpConfigDib),
    /// Assigned individual addresses
    KnxAddresses(KnxAddressesDib),
    /// Manufacturer data
    ManufacturerData(ManufacturerDataDib),
    /// Structure with an unknown code
    Unknown(KnxNetIpStruct),
}

impl Dib {
    /// Read the DIB at `offset`.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Self {
        let raw = KnxNetIpStruct::from_bytes(bytes, offset);
        match DescriptionType::from_u8(raw.code()) {
            Some(DescriptionType::DeviceInfo) => Self::DeviceInfo(raw.into()),
            Some(DescriptionType::SupportedServiceFamilies) => {
                Self::SupportedServiceFamilies(raw.into())
            }
            Some(DescriptionType::IpConfig) => Self::IpConfig(raw.into()),
            Some(DescriptionType::CurrentIpConfig) => Self::CurrentIpConfig(raw.into()),
            Some(DescriptionType::KnxAddresses) => Self::KnxAddresses(raw.into()),
            Some(DescriptionType::ManufacturerData) => Self::ManufacturerData(raw.into()),
            None => Self::Unknown(raw),
        }
    }

    /// Read consecutive DIBs until the input ends or a structure is
    /// malformed.
    pub fn parse_all(bytes: &[u8], offset: usize) -> Vec<Self> {
        let mut dibs = Vec::new();
        let mut offset = offset;
        while offset < bytes.len() {
            let dib = Self::from_bytes(bytes, offset);
            if !dib.as_struct().is_valid() {
                break;
            }
            offset += dib.size();
            dibs.push(dib);
        }
        dibs
    }

    /// The untyped structure.
    pub fn as_struct(&self) -> &KnxNetIpStruct {
        match self {
            Self::DeviceInfo(dib) => dib.as_struct(),
            Self::SupportedServiceFamilies(dib) => dib.as_struct(),
            Self::IpConfig(dib) => dib.as_struct(),
            Self::CurrentIpConfig(dib) => dib.as_struct(),
            Self::KnxAddresses(dib) => dib.as_struct(),
            Self::ManufacturerData(dib) => dib.as_struct(),
            Self::Unknown(raw) => raw,
        }
    }

    /// Description type, `None` for unknown codes.
    pub fn description_type(&self) -> Option<DescriptionType> {
        DescriptionType::from_u8(self.as_struct().code())
    }

    /// Encoded size.
    pub fn size(&self) -> usize {
        self.as_struct().size()
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        self.as_struct().bytes()
    }

    /// Validity of the typed DIB. Unknown codes are never valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::DeviceInfo(dib) => dib.is_valid(),
            Self::SupportedServiceFamilies(dib) => dib.is_valid(),
            Self::IpConfig(dib) => dib.is_valid(),
            Self::CurrentIpConfig(dib) => dib.is_valid(),
            Self::KnxAddresses(dib) => dib.is_valid(),
            Self::ManufacturerData(dib) => dib.is_valid(),
            Self::Unknown(_) => false,
        }
    }
}

impl AsRef<[u8]> for Dib {
    fn as_ref(&self) -> &[u8] {
        self.bytes()
    }
}

macro_rules! impl_from_dib {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Dib {
                fn from(dib: $ty) -> Self {
                    Self::$variant(dib)
                }
            }
        )*
    };
}

impl_from_dib!(
    DeviceInfo(DeviceInfoDib),
    SupportedServiceFamilies(ServiceFamiliesDib),
    IpConfig(IpConfigDib),
    CurrentIpConfig(CurrentIpConfigDib),
    KnxAddresses(KnxAddressesDib),
    ManufacturerData(ManufacturerDataDib),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::IndividualAddress;

    #[test]
    fn test_dispatch() {
        let mut bytes = KnxAddressesDib::new(&[IndividualAddress::from(0x1101)]).bytes().to_vec();
        bytes.extend_from_slice(ManufacturerDataDib::new(0x00C5, &[]).bytes());
        bytes.extend_from_slice(&[0x03, 0x42, 0x00]);

        let dibs = Dib::parse_all(&bytes, 0);
        assert_eq!(dibs.len(), 3);
        assert!(matches!(dibs[0], Dib::KnxAddresses(_)));
        assert_eq!(dibs[1].description_type(), Some(DescriptionType::ManufacturerData));
        assert!(dibs[1].is_valid());
        assert!(matches!(dibs[2], Dib::Unknown(_)));
        assert!(!dibs[2].is_valid());
    }

    #[test]
    fn test_parse_all_stops_on_truncation() {
        let bytes = [0x04, 0x05, 0x11, 0x01, 0x08, 0x05, 0x12];
        let dibs = Dib::parse_all(&bytes, 0);
        assert_eq!(dibs.len(), 1);
        assert_eq!(Dib::from(ServiceFamiliesDib::new()).size(), 2);
    }
}
