//! Interface object types and property identifiers.
//!
//! Property identifiers 1..=30 are general and apply to every object type.
//! Identifiers from 51 upwards are object specific; the same number means
//! different things on different objects, so a property is only valid
//! together with the object type it belongs to.

use core::ops::RangeInclusive;

/// Interface object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum InterfaceObjectType {
    /// Device object
    Device = 0,
    /// Group address table
    AddressTable = 1,
    /// Group object association table
    AssociationTable = 2,
    /// Application program
    ApplicationProgram = 3,
    /// Interface program
    InterfaceProgram = 4,
    /// EIB object association table
    EibObjectAssociationTable = 5,
    /// Router / coupler
    Router = 6,
    /// LTE address routing table
    LteAddressRoutingTable = 7,
    /// cEMI server
    CemiServer = 8,
    /// Group object table
    GroupObjectTable = 9,
    /// Polling master
    PollingMaster = 10,
    /// KNXnet/IP parameter
    KnxNetIpParameter = 11,
    /// File server
    FileServer = 13,
    /// Security
    Security = 17,
    /// RF medium
    RfMedium = 19,
}

impl InterfaceObjectType {
    /// Convert u16 to `InterfaceObjectType`
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::Device),
            1 => Some(Self::AddressTable),
            2 => Some(Self::AssociationTable),
            3 => Some(Self::ApplicationProgram),
            4 => Some(Self::InterfaceProgram),
            5 => Some(Self::EibObjectAssociationTable),
            6 => Some(Self::Router),
            7 => Some(Self::LteAddressRoutingTable),
            8 => Some(Self::CemiServer),
            9 => Some(Self::GroupObjectTable),
            10 => Some(Self::PollingMaster),
            11 => Some(Self::KnxNetIpParameter),
            13 => Some(Self::FileServer),
            17 => Some(Self::Security),
            19 => Some(Self::RfMedium),
            _ => None,
        }
    }

    /// Convert `InterfaceObjectType` to u16
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Object specific property identifiers, `None` for objects with
    /// general properties only.
    pub const fn specific_properties(self) -> Option<RangeInclusive<u8>> {
        match self {
            Self::Device => Some(51..=86),
            Self::Router => Some(51..=58),
            Self::CemiServer => Some(51..=63),
            Self::KnxNetIpParameter => Some(51..=76),
            _ => None,
        }
    }

    /// Whether `property` is defined for this object type.
    pub fn is_match(self, property: u8) -> bool {
        is_general_property(property)
            || self
                .specific_properties()
                .is_some_and(|range| range.contains(&property))
    }
}

/// Whether `pid` is one of the general identifiers shared by every
/// object type.
pub const fn is_general_property(pid: u8) -> bool {
    pid >= property::OBJECT_TYPE && pid <= property::DOWNLOAD_COUNTER
}

/// Whether the raw object type code and property identifier belong together.
pub fn is_match(object_type: u16, property: u8) -> bool {
    InterfaceObjectType::from_u16(object_type).is_some_and(|object| object.is_match(property))
}

/// Well-known property identifiers.
pub mod property {
    /// Interface object type
    pub const OBJECT_TYPE: u8 = 1;
    /// Interface object name
    pub const OBJECT_NAME: u8 = 2;
    /// Semaphor
    pub const SEMAPHOR: u8 = 3;
    /// Group object reference
    pub const GROUP_OBJECT_REFERENCE: u8 = 4;
    /// Load state control
    pub const LOAD_STATE_CONTROL: u8 = 5;
    /// Run state control
    pub const RUN_STATE_CONTROL: u8 = 6;
    /// Table reference
    pub const TABLE_REFERENCE: u8 = 7;
    /// Service control
    pub const SERVICE_CONTROL: u8 = 8;
    /// Firmware revision
    pub const FIRMWARE_REVISION: u8 = 9;
    /// Services supported
    pub const SERVICES_SUPPORTED: u8 = 10;
    /// KNX serial number
    pub const SERIAL_NUMBER: u8 = 11;
    /// Manufacturer identifier
    pub const MANUFACTURER_ID: u8 = 12;
    /// Application program version
    pub const PROGRAM_VERSION: u8 = 13;
    /// Device control
    pub const DEVICE_CONTROL: u8 = 14;
    /// Order info
    pub const ORDER_INFO: u8 = 15;
    /// PEI type
    pub const PEI_TYPE: u8 = 16;
    /// Port configuration
    pub const PORT_CONFIGURATION: u8 = 17;
    /// Polling group settings
    pub const POLL_GROUP_SETTINGS: u8 = 18;
    /// Manufacturer data
    pub const MANUFACTURER_DATA: u8 = 19;
    /// Enable
    pub const ENABLE: u8 = 20;
    /// Description
    pub const DESCRIPTION: u8 = 21;
    /// File
    pub const FILE: u8 = 22;
    /// Table
    pub const TABLE: u8 = 23;
    /// Enrolment
    pub const ENROL: u8 = 24;
    /// Version
    pub const VERSION: u8 = 25;
    /// Group object link
    pub const GROUP_OBJECT_LINK: u8 = 26;
    /// Memory control table
    pub const MCB_TABLE: u8 = 27;
    /// Error code
    pub const ERROR_CODE: u8 = 28;
    /// Object index
    pub const OBJECT_INDEX: u8 = 29;
    /// Download counter
    pub const DOWNLOAD_COUNTER: u8 = 30;

    /// Device: routing count
    pub const DEVICE_ROUTING_COUNT: u8 = 51;
    /// Device: programming mode
    pub const DEVICE_PROGRAMMING_MODE: u8 = 54;
    /// Device: subnet address
    pub const DEVICE_SUBNET_ADDRESS: u8 = 57;
    /// Device: device address
    pub const DEVICE_ADDRESS: u8 = 58;
    /// Device: device descriptor
    pub const DEVICE_DESCRIPTOR: u8 = 83;

    /// cEMI server: medium type
    pub const CEMI_MEDIUM_TYPE: u8 = 51;
    /// cEMI server: communication mode
    pub const CEMI_COMMUNICATION_MODE: u8 = 52;

    /// KNXnet/IP: project installation id
    pub const KNXNETIP_PROJECT_INSTALLATION_ID: u8 = 51;
    /// KNXnet/IP: KNX individual address
    pub const KNXNETIP_INDIVIDUAL_ADDRESS: u8 = 52;
    /// KNXnet/IP: current IP address
    pub const KNXNETIP_CURRENT_IP_ADDRESS: u8 = 57;
    /// KNXnet/IP: MAC address
    pub const KNXNETIP_MAC_ADDRESS: u8 = 64;
    /// KNXnet/IP: friendly name
    pub const KNXNETIP_FRIENDLY_NAME: u8 = 76;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_properties_match_every_object() {
        for code in [0u16, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 17, 19] {
            assert!(is_match(code, property::OBJECT_TYPE), "object {code}");
            assert!(is_match(code, property::DOWNLOAD_COUNTER), "object {code}");
            assert!(!is_match(code, 31), "object {code}");
        }
    }

    #[test]
    fn test_specific_properties() {
        assert!(is_match(0, property::DEVICE_DESCRIPTOR));
        assert!(!is_match(0, 87));
        assert!(is_match(11, property::KNXNETIP_FRIENDLY_NAME));
        assert!(!is_match(8, property::KNXNETIP_FRIENDLY_NAME));
        assert!(!is_match(1, 51));
    }

    #[test]
    fn test_unknown_object_type() {
        assert!(!is_match(12, property::OBJECT_TYPE));
        assert_eq!(InterfaceObjectType::from_u16(19), Some(InterfaceObjectType::RfMedium));
        assert_eq!(InterfaceObjectType::KnxNetIpParameter.to_u16(), 11);
    }
}
