//! Typed KNXnet/IP service frames.
//!
//! Every service is a thin view over a [`KnxNetIpFrame`] whose service type
//! was checked on construction. Builders never fail: bad arguments produce
//! frames whose `is_valid()` is `false`.
//!
//! ## Protocol Flow
//!
//! ```text
//! Client                          Server
//!   |                                |
//!   |------- SEARCH_REQUEST -------->|  (multicast)
//!   |<------ SEARCH_RESPONSE --------|
//!   |                                |
//!   |------- CONNECT_REQUEST ------->|
//!   |<------ CONNECT_RESPONSE -------|
//!   |                                |
//!   |------ TUNNELING_REQUEST ------>|
//!   |<------ TUNNELING_ACK ----------|
//!   |                                |
//!   |--- CONNECTIONSTATE_REQUEST --->|
//!   |<-- CONNECTIONSTATE_RESPONSE ---|
//!   |                                |
//!   |------ DISCONNECT_REQUEST ----->|
//!   |<----- DISCONNECT_RESPONSE -----|
//! ```
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::protocol::services::{ServiceFrame, SearchRequest};
//! use knx_ip_core::protocol::hpai::Hpai;
//! use knx_ip_core::{IpEndpoint, Ipv4Addr};
//!
//! let endpoint = IpEndpoint::new(Ipv4Addr::LOCALHOST, 50000);
//! let request = SearchRequest::new(&Hpai::udp(endpoint));
//! match ServiceFrame::parse(&request.bytes()).unwrap() {
//!     ServiceFrame::SearchRequest(parsed) => assert!(parsed.is_valid()),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use crate::error::{KnxError, Result};
use crate::protocol::constants::ServiceType;
use crate::protocol::frame::{KnxNetIpFrame, KnxNetIpHeader};

/// Declare a service frame type bound to one service type.
macro_rules! service_frame {
    ($(#[$meta:meta])* $name:ident, $service:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            frame: $crate::protocol::frame::KnxNetIpFrame,
        }

        impl $name {
            /// Service type carried by this frame.
            pub const SERVICE_TYPE: $crate::protocol::constants::ServiceType =
                $crate::protocol::constants::ServiceType::$service;

            /// Wrap `frame` if it carries this service type.
            pub fn from_frame(frame: $crate::protocol::frame::KnxNetIpFrame) -> Option<Self> {
                (frame.service_type() == Some(Self::SERVICE_TYPE)).then_some(Self { frame })
            }

            /// Read the frame at `offset`. `None` when the header names
            /// another service.
            pub fn from_bytes(bytes: &[u8], offset: usize) -> Option<Self> {
                Self::from_frame($crate::protocol::frame::KnxNetIpFrame::from_bytes(bytes, offset))
            }

            /// The generic frame.
            pub fn frame(&self) -> &$crate::protocol::frame::KnxNetIpFrame {
                &self.frame
            }

            /// Frame body.
            pub fn body(&self) -> &[u8] {
                self.frame.body()
            }

            /// Encoded size.
            pub fn size(&self) -> usize {
                self.frame.size()
            }

            /// Encoded frame.
            pub fn bytes(&self) -> alloc::vec::Vec<u8> {
                self.frame.bytes()
            }

            fn with_body(body: &[u8]) -> Self {
                Self {
                    frame: $crate::protocol::frame::KnxNetIpFrame::new(Self::SERVICE_TYPE, body),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::with_body(&[])
            }
        }

        impl From<$name> for $crate::protocol::frame::KnxNetIpFrame {
            fn from(value: $name) -> Self {
                value.frame
            }
        }
    };
}

pub(crate) use service_frame;

pub mod connect;
pub mod connection_state;
pub mod description;
pub mod device_configuration;
pub mod disconnect;
pub mod routing;
pub mod search;
pub mod tunneling;

pub use connect::{ConnectRequest, ConnectResponse};
pub use connection_state::{ConnectionStateRequest, ConnectionStateResponse};
pub use description::{DescriptionRequest, DescriptionResponse};
pub use device_configuration::{DeviceConfigurationAck, DeviceConfigurationRequest};
pub use disconnect::{DisconnectRequest, DisconnectResponse};
pub use routing::{RoutingBusy, RoutingIndication, RoutingLostMessage};
pub use search::{SearchRequest, SearchResponse};
pub use tunneling::{TunnelingAck, TunnelingRequest};

/// Any supported service frame, selected by the header's service type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceFrame {
    /// `SEARCH_REQUEST`
    SearchRequest(SearchRequest),
    /// `SEARCH_RESPONSE`
    SearchResponse(SearchResponse),
    /// `DESCRIPTION_REQUEST`
    DescriptionRequest(DescriptionRequest),
    /// `DESCRIPTION_RESPONSE`
    DescriptionResponse(DescriptionResponse),
    /// `CONNECT_REQUEST`
    ConnectRequest(ConnectRequest),
    /// `CONNECT_RESPONSE`
    ConnectResponse(ConnectResponse),
    /// `CONNECTIONSTATE_REQUEST`
    ConnectionStateRequest(ConnectionStateRequest),
    /// `CONNECTIONSTATE_RESPONSE`
    ConnectionStateResponse(ConnectionStateResponse),
    /// `DISCONNECT_REQUEST`
    DisconnectRequest(DisconnectRequest),
    /// `DISCONNECT_RESPONSE`
    DisconnectResponse(DisconnectResponse),
    /// `DEVICE_CONFIGURATION_REQUEST`
    DeviceConfigurationRequest(DeviceConfigurationRequest),
    /// `DEVICE_CONFIGURATION_ACK`
    DeviceConfigurationAck(DeviceConfigurationAck),
    /// `TUNNELING_REQUEST`
    TunnelingRequest(TunnelingRequest),
    /// `TUNNELING_ACK`
    TunnelingAck(TunnelingAck),
    /// `ROUTING_INDICATION`
    RoutingIndication(RoutingIndication),
    /// `ROUTING_LOST_MESSAGE`
    RoutingLostMessage(RoutingLostMessage),
    /// `ROUTING_BUSY`
    RoutingBusy(RoutingBusy),
}

impl ServiceFrame {
    /// Parse a datagram into its typed frame
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The header is malformed or shorter than 6 bytes
    /// - The protocol version is not 1.0
    /// - The service type is unknown
    /// - The datagram is shorter than the header's total length
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = KnxNetIpHeader::parse(data).inspect_err(|_err| {
            knx_log!(debug, "rejecting {} byte datagram: bad header", data.len());
        })?;
        if data.len() < usize::from(header.total_length()) {
            knx_log!(
                debug,
                "rejecting datagram: {} of {} bytes present",
                data.len(),
                header.total_length()
            );
            return Err(KnxError::invalid_frame());
        }

        let frame = KnxNetIpFrame::from_bytes(data, 0);
        let service = header.service_type().ok_or_else(KnxError::unsupported_service_type)?;
        Self::from_typed(service, frame).ok_or_else(KnxError::unsupported_service_type)
    }

    fn from_typed(service: ServiceType, frame: KnxNetIpFrame) -> Option<Self> {
        Some(match service {
            ServiceType::SearchRequest => Self::SearchRequest(SearchRequest::from_frame(frame)?),
            ServiceType::SearchResponse => Self::SearchResponse(SearchResponse::from_frame(frame)?),
            ServiceType::DescriptionRequest => {
                Self::DescriptionRequest(DescriptionRequest::from_frame(frame)?)
            }
            ServiceType::DescriptionResponse => {
                Self::DescriptionResponse(DescriptionResponse::from_frame(frame)?)
            }
            ServiceType::ConnectRequest => Self::ConnectRequest(ConnectRequest::from_frame(frame)?),
            ServiceType::ConnectResponse => {
                Self::ConnectResponse(ConnectResponse::from_frame(frame)?)
            }
            ServiceType::ConnectionStateRequest => {
                Self::ConnectionStateRequest(ConnectionStateRequest::from_frame(frame)?)
            }
            ServiceType::ConnectionStateResponse => {
                Self::ConnectionStateResponse(ConnectionStateResponse::from_frame(frame)?)
            }
            ServiceType::DisconnectRequest => {
                Self::DisconnectRequest(DisconnectRequest::from_frame(frame)?)
            }
            ServiceType::DisconnectResponse => {
                Self::DisconnectResponse(DisconnectResponse::from_frame(frame)?)
            }
            ServiceType::DeviceConfigurationRequest => {
                Self::DeviceConfigurationRequest(DeviceConfigurationRequest::from_frame(frame)?)
            }
            ServiceType::DeviceConfigurationAck => {
                Self::DeviceConfigurationAck(DeviceConfigurationAck::from_frame(frame)?)
            }
            ServiceType::TunnelingRequest => {
                Self::TunnelingRequest(TunnelingRequest::from_frame(frame)?)
            }
            ServiceType::TunnelingAck => Self::TunnelingAck(TunnelingAck::from_frame(frame)?),
            ServiceType::RoutingIndication => {
                Self::RoutingIndication(RoutingIndication::from_frame(frame)?)
            }
            ServiceType::RoutingLostMessage => {
                Self::RoutingLostMessage(RoutingLostMessage::from_frame(frame)?)
            }
            ServiceType::RoutingBusy => Self::RoutingBusy(RoutingBusy::from_frame(frame)?),
        })
    }

    /// The generic frame behind the typed one.
    pub fn frame(&self) -> &KnxNetIpFrame {
        match self {
            Self::SearchRequest(f) => f.frame(),
            Self::SearchResponse(f) => f.frame(),
            Self::DescriptionRequest(f) => f.frame(),
            Self::DescriptionResponse(f) => f.frame(),
            Self::ConnectRequest(f) => f.frame(),
            Self::ConnectResponse(f) => f.frame(),
            Self::ConnectionStateRequest(f) => f.frame(),
            Self::ConnectionStateResponse(f) => f.frame(),
            Self::DisconnectRequest(f) => f.frame(),
            Self::DisconnectResponse(f) => f.frame(),
            Self::DeviceConfigurationRequest(f) => f.frame(),
            Self::DeviceConfigurationAck(f) => f.frame(),
            Self::TunnelingRequest(f) => f.frame(),
            Self::TunnelingAck(f) => f.frame(),
            Self::RoutingIndication(f) => f.frame(),
            Self::RoutingLostMessage(f) => f.frame(),
            Self::RoutingBusy(f) => f.frame(),
        }
    }

    /// Service type of the frame.
    pub fn service_type(&self) -> Option<ServiceType> {
        self.frame().service_type()
    }

    /// Body-level validity of the typed frame.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::SearchRequest(f) => f.is_valid(),
            Self::SearchResponse(f) => f.is_valid(),
            Self::DescriptionRequest(f) => f.is_valid(),
            Self::DescriptionResponse(f) => f.is_valid(),
            Self::ConnectRequest(f) => f.is_valid(),
            Self::ConnectResponse(f) => f.is_valid(),
            Self::ConnectionStateRequest(f) => f.is_valid(),
            Self::ConnectionStateResponse(f) => f.is_valid(),
            Self::DisconnectRequest(f) => f.is_valid(),
            Self::DisconnectResponse(f) => f.is_valid(),
            Self::DeviceConfigurationRequest(f) => f.is_valid(),
            Self::DeviceConfigurationAck(f) => f.is_valid(),
            Self::TunnelingRequest(f) => f.is_valid(),
            Self::TunnelingAck(f) => f.is_valid(),
            Self::RoutingIndication(f) => f.is_valid(),
            Self::RoutingLostMessage(f) => f.is_valid(),
            Self::RoutingBusy(f) => f.is_valid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::ErrorCode;

    #[test]
    fn test_parse_dispatch() {
        let bytes = [0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x01, 0x00];
        let frame = ServiceFrame::parse(&bytes).unwrap();
        assert_eq!(frame.service_type(), Some(ServiceType::DisconnectResponse));
        assert!(frame.is_valid());
        match frame {
            ServiceFrame::DisconnectResponse(response) => {
                assert_eq!(response.channel_id(), 1);
                assert_eq!(response.status(), Some(ErrorCode::NoError));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_errors() {
        let unknown = [0x06, 0x10, 0x07, 0x77, 0x00, 0x06];
        assert!(matches!(
            ServiceFrame::parse(&unknown),
            Err(KnxError::Protocol(ref e)) if e.is_unsupported_service_type()
        ));

        let truncated = [0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x01];
        assert!(matches!(
            ServiceFrame::parse(&truncated),
            Err(KnxError::Protocol(ref e)) if e.is_invalid_frame()
        ));

        assert!(ServiceFrame::parse(&[]).is_err());
    }

    #[test]
    fn test_body_problems_are_not_errors() {
        let bytes = [0x06, 0x10, 0x02, 0x0A, 0x00, 0x07, 0x01];
        let frame = ServiceFrame::parse(&bytes).unwrap();
        assert!(!frame.is_valid());
    }
}
