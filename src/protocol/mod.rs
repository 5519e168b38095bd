//! KNXnet/IP protocol implementation.
//!
//! This module contains the wire structures of KNXnet/IP (header, HPAI,
//! CRI/CRD, connection header, DIBs), the typed service frames built from
//! them, and the cEMI layer they carry.

pub mod structure;

pub mod cemi;
pub mod connection_header;
pub mod constants;
pub mod crd;
pub mod cri;
pub mod dib;
pub mod frame;
pub mod hpai;
pub mod services;

pub use connection_header::ConnectionHeader;
pub use constants::{ErrorCode, ServiceType};
pub use crd::Crd;
pub use cri::Cri;
pub use dib::Dib;
pub use frame::{KnxNetIpFrame, KnxNetIpHeader};
pub use hpai::Hpai;
pub use services::ServiceFrame;
pub use structure::KnxNetIpStruct;
