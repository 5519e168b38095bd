//! Builders for the TPDU of each application service.
//!
//! Services are grouped by how they are addressed:
//!
//! - [`multicast`]: group communication
//! - [`broadcast`]: individual address assignment
//! - [`p2p`]: point to point, with or without a transport connection
//! - [`connection_oriented`]: point to point inside a transport connection
//!
//! Every builder is pure. Arguments outside the service's bounds produce
//! an invalid TPDU (`tpci() == Tpci::Invalid`) instead of an error.
//!
//! ```
//! use knx_ip_core::protocol::cemi::tpdu_factory::{connection_oriented, multicast};
//!
//! let write = multicast::group_value_write_short(1);
//! assert_eq!(write.bytes(), [0x00, 0x81]);
//!
//! let read = connection_oriented::memory_read(2, 0x0104, 3);
//! assert_eq!(read.bytes(), [0x4E, 0x02, 0x01, 0x04]);
//!
//! assert!(!connection_oriented::memory_read(64, 0x0104, 3).is_valid());
//! ```

use super::tpdu::{Apci, Tpci, Tpdu};

pub mod broadcast;
pub mod connection_oriented;
pub mod multicast;
pub mod p2p;

/// Transport mode of a point-to-point service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// `T_Data_Individual`
    #[default]
    Connectionless,
    /// `T_Data_Connected`, numbered
    ConnectionOriented,
}

impl Mode {
    const fn tpci(self) -> Tpci {
        match self {
            Self::Connectionless => Tpci::DataIndividual,
            Self::ConnectionOriented => Tpci::DataConnected,
        }
    }
}

/// Assemble a data TPDU from payload fragments.
fn build(tpci: Tpci, apci: Apci, seq: u8, apci_data: u8, parts: &[&[u8]]) -> Tpdu {
    Tpdu::with_apci_data(tpci, apci, seq, apci_data, &parts.concat())
}
