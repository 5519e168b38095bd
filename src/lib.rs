#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # knx-ip-core
//!
//! Byte-exact codecs for the KNX/IP stack, usable from `no_std` + `alloc`.
//!
//! ## Layers
//!
//! - [`addressing`]: group and individual addresses with 2- and 3-level notation
//! - [`dpt`]: datapoint types and the static type registry
//! - [`protocol::cemi`]: link-layer and device-management cEMI frames, TPDU factory
//! - [`protocol`]: KNXnet/IP header, HPAI, CRI/CRD, DIBs and service frames
//! - [`knx_discovery`]: search-request/search-response discovery state machine
//! - [`knxproj`]: building structure from a project file element stream
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::protocol::services::{DisconnectResponse, ServiceFrame};
//! use knx_ip_core::protocol::constants::ErrorCode;
//!
//! let response = DisconnectResponse::new(1, ErrorCode::NoError);
//! assert_eq!(response.bytes(), [0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x01, 0x00]);
//!
//! let parsed = ServiceFrame::parse(&response.bytes()).unwrap();
//! assert!(matches!(parsed, ServiceFrame::DisconnectResponse(_)));
//! ```

extern crate alloc;

// Macro modules first so the rest of the crate sees them
#[macro_use]
pub mod logging;
#[macro_use]
pub mod macros;

pub mod addressing;
pub mod byte_store;
pub mod codec;
pub mod dpt;
pub mod error;
pub mod knx_discovery;
pub mod knxproj;
pub mod net;
pub mod protocol;

#[cfg(feature = "log")]
#[doc(hidden)]
pub use log as __log;

// Re-export commonly used types
#[doc(inline)]
pub use addressing::{AddressType, GroupAddress, IndividualAddress, KnxAddress, Notation};
#[doc(inline)]
pub use byte_store::{ByteStore, ByteStoreRef};
#[doc(inline)]
pub use dpt::{Datapoint, DatapointKind, DatapointType, DptId};
#[doc(inline)]
pub use error::{KnxError, Result};
#[doc(inline)]
pub use knx_discovery::{DiscoveryAgent, DiscoveryConfig, DiscoveryEvent, ServerInfo};
#[doc(inline)]
pub use net::{IpEndpoint, Ipv4Addr};
