//! cEMI additional information elements.
//!
//! ```text
//! ┌──────────┬──────────┬────────────────────┐
//! │ Type (1) │ Len (1)  │ Data (Len bytes)   │
//! └──────────┴──────────┴────────────────────┘
//! ```
//!
//! Most types carry a fixed amount of data. `RfFastAckInformation` and
//! `ManufacturerSpecificData` are variable length with a lower bound.

use crate::byte_store::ByteStore;

/// Additional information type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AdditionalInfoType {
    /// PL medium domain address
    PlMediumInformation = 0x01,
    /// RF medium information
    RfMediumInformation = 0x02,
    /// Busmonitor status/error flags
    BusmonitorStatusInfo = 0x03,
    /// Relative timestamp
    TimestampRelative = 0x04,
    /// Time delay until sending
    TimeDelayUntilSending = 0x05,
    /// Extended relative timestamp
    ExtendedRelativeTimestamp = 0x06,
    /// `BiBat` information
    BiBatInformation = 0x07,
    /// RF multi information
    RfMultiInformation = 0x08,
    /// Preamble and postamble
    PreambleAndPostamble = 0x09,
    /// RF fast acknowledge information
    RfFastAckInformation = 0x0A,
    /// Manufacturer specific data
    ManufacturerSpecificData = 0xFE,
}

impl AdditionalInfoType {
    /// Convert u8 to `AdditionalInfoType`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::PlMediumInformation),
            0x02 => Some(Self::RfMediumInformation),
            0x03 => Some(Self::BusmonitorStatusInfo),
            0x04 => Some(Self::TimestampRelative),
            0x05 => Some(Self::TimeDelayUntilSending),
            0x06 => Some(Self::ExtendedRelativeTimestamp),
            0x07 => Some(Self::BiBatInformation),
            0x08 => Some(Self::RfMultiInformation),
            0x09 => Some(Self::PreambleAndPostamble),
            0x0A => Some(Self::RfFastAckInformation),
            0xFE => Some(Self::ManufacturerSpecificData),
            _ => None,
        }
    }

    /// Expected data size and whether it is exact. For variable types the
    /// size is the minimum.
    pub const fn expected_data_size(self) -> (usize, bool) {
        let size = match self {
            Self::PlMediumInformation => 2,
            Self::RfMediumInformation => 8,
            Self::BusmonitorStatusInfo => 1,
            Self::TimestampRelative => 2,
            Self::TimeDelayUntilSending => 4,
            Self::ExtendedRelativeTimestamp => 4,
            Self::BiBatInformation => 2,
            Self::RfMultiInformation => 4,
            Self::PreambleAndPostamble => 3,
            Self::RfFastAckInformation => 2,
            Self::ManufacturerSpecificData => 3,
        };
        (size, (self as u8) < (Self::RfFastAckInformation as u8))
    }

    /// Whether `len` octets of data fit this type.
    pub const fn accepts_data_size(self, len: usize) -> bool {
        let (expected, fixed) = self.expected_data_size();
        match self {
            _ if fixed => len == expected,
            Self::RfFastAckInformation => len >= expected && len % 2 == 0,
            _ => len >= expected,
        }
    }
}

/// One additional information element.
///
/// Constructed elements that fail validation hold no bytes.
///
/// ```
/// use knx_ip_core::protocol::cemi::{AdditionalInfo, AdditionalInfoType};
///
/// let info = AdditionalInfo::new(AdditionalInfoType::BusmonitorStatusInfo, &[0x00]);
/// assert!(info.is_valid());
/// assert_eq!(info.bytes(), [0x03, 0x01, 0x00]);
///
/// let info = AdditionalInfo::new(AdditionalInfoType::BusmonitorStatusInfo, &[0x00, 0x00]);
/// assert!(!info.is_valid());
/// assert!(info.bytes().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdditionalInfo {
    store: ByteStore,
}

impl AdditionalInfo {
    /// Largest data length an element can carry.
    pub const MAX_DATA_SIZE: usize = 252;

    /// Build an element. Invalid type/data combinations yield an empty element.
    pub fn new(info_type: AdditionalInfoType, data: &[u8]) -> Self {
        if data.len() > Self::MAX_DATA_SIZE || !info_type.accepts_data_size(data.len()) {
            return Self::default();
        }
        let mut store = ByteStore::from_slice(&[info_type as u8, data.len() as u8]);
        store.append(data);
        Self { store }
    }

    /// Read an element starting at `offset`. Truncated input yields an
    /// empty element.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Self {
        let Some(len) = bytes.get(offset + 1) else {
            return Self::default();
        };
        match bytes.get(offset..offset + 2 + usize::from(*len)) {
            Some(element) => Self {
                store: ByteStore::from_slice(element),
            },
            None => Self::default(),
        }
    }

    /// Element type, `None` for an empty element or an unknown code.
    pub fn info_type(&self) -> Option<AdditionalInfoType> {
        self.store.byte(0).and_then(AdditionalInfoType::from_u8)
    }

    /// Declared data length.
    pub fn data_size(&self) -> usize {
        self.store.byte(1).map_or(0, usize::from)
    }

    /// Element data without type and length.
    pub fn data(&self) -> &[u8] {
        self.store.as_slice().get(2..).unwrap_or(&[])
    }

    /// Total encoded size.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// `[type][len][data]`
    pub fn bytes(&self) -> &[u8] {
        self.store.as_slice()
    }

    /// Known type, data length matching the length octet and the type's
    /// size rule.
    pub fn is_valid(&self) -> bool {
        let Some(info_type) = self.info_type() else {
            return false;
        };
        let data = self.data();
        self.store.size() <= Self::MAX_DATA_SIZE + 2
            && data.len() == self.data_size()
            && info_type.accepts_data_size(data.len())
    }
}
