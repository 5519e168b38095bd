//! KNXnet/IP protocol constants and code tables.

use crate::net::Ipv4Addr;

/// KNXnet/IP protocol version 1.0
pub const KNXNETIP_VERSION_10: u8 = 0x10;

/// Standard KNXnet/IP header length (6 bytes)
pub const HEADER_SIZE_10: u8 = 0x06;

/// Standard UDP port for KNXnet/IP communication
pub const KNXNETIP_DEFAULT_PORT: u16 = 3671;

/// KNXnet/IP multicast address for search requests and routing
pub const KNXNETIP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::KNX_MULTICAST;

// =============================================================================
// Service Type Identifiers
// =============================================================================

/// KNXnet/IP service type identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ServiceType {
    // Core services (0x02xx)
    /// `SEARCH_REQUEST` - Device discovery request
    SearchRequest = 0x0201,
    /// `SEARCH_RESPONSE` - Device discovery response
    SearchResponse = 0x0202,
    /// `DESCRIPTION_REQUEST` - Device description request
    DescriptionRequest = 0x0203,
    /// `DESCRIPTION_RESPONSE` - Device description response
    DescriptionResponse = 0x0204,
    /// `CONNECT_REQUEST` - Connection request
    ConnectRequest = 0x0205,
    /// `CONNECT_RESPONSE` - Connection response
    ConnectResponse = 0x0206,
    /// `CONNECTIONSTATE_REQUEST` - Connection state request (heartbeat)
    ConnectionStateRequest = 0x0207,
    /// `CONNECTIONSTATE_RESPONSE` - Connection state response
    ConnectionStateResponse = 0x0208,
    /// `DISCONNECT_REQUEST` - Disconnect request
    DisconnectRequest = 0x0209,
    /// `DISCONNECT_RESPONSE` - Disconnect response
    DisconnectResponse = 0x020A,

    // Device Management (0x03xx)
    /// `DEVICE_CONFIGURATION_REQUEST`
    DeviceConfigurationRequest = 0x0310,
    /// `DEVICE_CONFIGURATION_ACK`
    DeviceConfigurationAck = 0x0311,

    // Tunneling (0x04xx)
    /// `TUNNELING_REQUEST` - Tunneling data request
    TunnelingRequest = 0x0420,
    /// `TUNNELING_ACK` - Tunneling acknowledgement
    TunnelingAck = 0x0421,

    // Routing (0x05xx)
    /// `ROUTING_INDICATION` - Routing indication (multicast)
    RoutingIndication = 0x0530,
    /// `ROUTING_LOST_MESSAGE` - Routing lost message indication
    RoutingLostMessage = 0x0531,
    /// `ROUTING_BUSY` - Routing busy indication
    RoutingBusy = 0x0532,
}

impl ServiceType {
    /// Convert a u16 to `ServiceType`
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0201 => Some(Self::SearchRequest),
            0x0202 => Some(Self::SearchResponse),
            0x0203 => Some(Self::DescriptionRequest),
            0x0204 => Some(Self::DescriptionResponse),
            0x0205 => Some(Self::ConnectRequest),
            0x0206 => Some(Self::ConnectResponse),
            0x0207 => Some(Self::ConnectionStateRequest),
            0x0208 => Some(Self::ConnectionStateResponse),
            0x0209 => Some(Self::DisconnectRequest),
            0x020A => Some(Self::DisconnectResponse),
            0x0310 => Some(Self::DeviceConfigurationRequest),
            0x0311 => Some(Self::DeviceConfigurationAck),
            0x0420 => Some(Self::TunnelingRequest),
            0x0421 => Some(Self::TunnelingAck),
            0x0530 => Some(Self::RoutingIndication),
            0x0531 => Some(Self::RoutingLostMessage),
            0x0532 => Some(Self::RoutingBusy),
            _ => None,
        }
    }

    /// Convert `ServiceType` to u16
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// The family is the high octet of the service type.
    pub const fn family(self) -> Option<ServiceFamily> {
        ServiceFamily::from_u8((self as u16 >> 8) as u8)
    }
}

// =============================================================================
// Status Codes
// =============================================================================

/// Status codes carried by KNXnet/IP responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ErrorCode {
    /// `E_NO_ERROR`
    #[default]
    NoError = 0x00,
    /// `E_HOST_PROTOCOL_TYPE` - requested host protocol not supported
    HostProtocolType = 0x01,
    /// `E_VERSION_NOT_SUPPORTED`
    VersionNotSupported = 0x02,
    /// `E_SEQUENCE_NUMBER` - received sequence number out of order
    SequenceNumber = 0x04,
    /// `E_CONNECTION_ID` - no active connection with this channel
    ConnectionId = 0x21,
    /// `E_CONNECTION_TYPE` - connection type not supported
    ConnectionType = 0x22,
    /// `E_CONNECTION_OPTION` - connection option not supported
    ConnectionOption = 0x23,
    /// `E_NO_MORE_CONNECTIONS`
    NoMoreConnections = 0x24,
    /// `E_DATA_CONNECTION` - error in the data connection
    DataConnection = 0x26,
    /// `E_KNX_CONNECTION` - error in the KNX subnetwork connection
    KnxConnection = 0x27,
    /// `E_TUNNELING_LAYER` - tunneling layer not supported
    TunnelingLayer = 0x29,
}

impl ErrorCode {
    /// Convert u8 to `ErrorCode`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::NoError),
            0x01 => Some(Self::HostProtocolType),
            0x02 => Some(Self::VersionNotSupported),
            0x04 => Some(Self::SequenceNumber),
            0x21 => Some(Self::ConnectionId),
            0x22 => Some(Self::ConnectionType),
            0x23 => Some(Self::ConnectionOption),
            0x24 => Some(Self::NoMoreConnections),
            0x26 => Some(Self::DataConnection),
            0x27 => Some(Self::KnxConnection),
            0x29 => Some(Self::TunnelingLayer),
            _ => None,
        }
    }

    /// Convert `ErrorCode` to u8
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// Structure Codes
// =============================================================================

/// Connection types of CRI/CRD structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ConnectionType {
    /// `DEVICE_MGMT_CONNECTION`
    DeviceManagement = 0x03,
    /// `TUNNEL_CONNECTION`
    Tunnel = 0x04,
    /// `REMLOG_CONNECTION`
    RemoteLogging = 0x06,
    /// `REMCONF_CONNECTION`
    RemoteConfiguration = 0x07,
    /// `OBJSVR_CONNECTION`
    ObjectServer = 0x08,
}

impl ConnectionType {
    /// Convert u8 to `ConnectionType`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x03 => Some(Self::DeviceManagement),
            0x04 => Some(Self::Tunnel),
            0x06 => Some(Self::RemoteLogging),
            0x07 => Some(Self::RemoteConfiguration),
            0x08 => Some(Self::ObjectServer),
            _ => None,
        }
    }

    /// Convert `ConnectionType` to u8
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Host protocol codes of an HPAI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum HostProtocol {
    /// `IPV4_UDP`
    #[default]
    Ipv4Udp = 0x01,
    /// `IPV4_TCP`
    Ipv4Tcp = 0x02,
}

impl HostProtocol {
    /// Convert u8 to `HostProtocol`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Ipv4Udp),
            0x02 => Some(Self::Ipv4Tcp),
            _ => None,
        }
    }

    /// Convert `HostProtocol` to u8
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Description information block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DescriptionType {
    /// `DEVICE_INFO`
    DeviceInfo = 0x01,
    /// `SUPP_SVC_FAMILIES`
    SupportedServiceFamilies = 0x02,
    /// `IP_CONFIG`
    IpConfig = 0x03,
    /// `IP_CUR_CONFIG`
    CurrentIpConfig = 0x04,
    /// `KNX_ADDRESSES`
    KnxAddresses = 0x05,
    /// `MFR_DATA`
    ManufacturerData = 0xFE,
}

impl DescriptionType {
    /// Convert u8 to `DescriptionType`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::DeviceInfo),
            0x02 => Some(Self::SupportedServiceFamilies),
            0x03 => Some(Self::IpConfig),
            0x04 => Some(Self::CurrentIpConfig),
            0x05 => Some(Self::KnxAddresses),
            0xFE => Some(Self::ManufacturerData),
            _ => None,
        }
    }

    /// Convert `DescriptionType` to u8
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Service families announced in a supported-service-families DIB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ServiceFamily {
    /// KNXnet/IP Core
    Core = 0x02,
    /// KNXnet/IP Device Management
    DeviceManagement = 0x03,
    /// KNXnet/IP Tunneling
    Tunneling = 0x04,
    /// KNXnet/IP Routing
    Routing = 0x05,
    /// KNXnet/IP Remote Logging
    RemoteLogging = 0x06,
    /// KNXnet/IP Remote Configuration and Diagnosis
    RemoteConfigAndDiagnosis = 0x07,
    /// KNXnet/IP Object Server
    ObjectServer = 0x08,
}

impl ServiceFamily {
    /// Convert u8 to `ServiceFamily`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x02 => Some(Self::Core),
            0x03 => Some(Self::DeviceManagement),
            0x04 => Some(Self::Tunneling),
            0x05 => Some(Self::Routing),
            0x06 => Some(Self::RemoteLogging),
            0x07 => Some(Self::RemoteConfigAndDiagnosis),
            0x08 => Some(Self::ObjectServer),
            _ => None,
        }
    }

    /// Convert `ServiceFamily` to u8
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// KNX layer requested by a tunneling CRI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TunnelLayer {
    /// `TUNNEL_LINKLAYER`
    #[default]
    LinkLayer = 0x02,
    /// `TUNNEL_RAW`
    RawLayer = 0x04,
    /// `TUNNEL_BUSMONITOR`
    BusmonitorLayer = 0x80,
}

impl TunnelLayer {
    /// Convert u8 to `TunnelLayer`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x02 => Some(Self::LinkLayer),
            0x04 => Some(Self::RawLayer),
            0x80 => Some(Self::BusmonitorLayer),
            _ => None,
        }
    }
}

/// KNX medium reported in a device information DIB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum KnxMedium {
    /// Twisted pair 1
    #[default]
    Tp1 = 0x02,
    /// Powerline 110
    Pl110 = 0x04,
    /// Radio frequency
    Rf = 0x10,
    /// KNX IP
    Ip = 0x20,
}

impl KnxMedium {
    /// Convert u8 to `KnxMedium`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x02 => Some(Self::Tp1),
            0x04 => Some(Self::Pl110),
            0x10 => Some(Self::Rf),
            0x20 => Some(Self::Ip),
            _ => None,
        }
    }
}
