//! KNX addressing.
//!
//! KNX uses two 16-bit address spaces:
//! - Individual addresses for physical devices (Area.Line.Device)
//! - Group addresses for logical functions (Main/Middle/Sub or Main/Sub)
//!
//! [`KnxAddress`] carries the space as a runtime tag; [`GroupAddress`] and
//! [`IndividualAddress`] fix it in the type.

pub mod address;
pub mod group;
pub mod individual;

pub use address::{AddressType, KnxAddress, Notation};
pub use group::GroupAddress;
pub use individual::IndividualAddress;
