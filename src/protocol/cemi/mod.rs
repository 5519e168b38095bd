//! Common External Message Interface (cEMI).
//!
//! cEMI is the media independent frame format carried inside KNXnet/IP
//! tunneling, routing and device configuration services. Two families
//! exist:
//!
//! - [`LinkLayerFrame`]: `L_Data` and friends, wrapping a [`Tpdu`]
//! - [`DeviceManagementFrame`]: property, function property and reset
//!   services addressed to the interface itself
//!
//! [`tpdu_factory`] builds the TPDU of each application service.

pub mod additional_info;
pub mod control_field;
pub mod device_management;
pub mod interface_object;
pub mod link_layer;
pub mod message_code;
pub mod tpdu;
pub mod tpdu_factory;

pub use additional_info::{AdditionalInfo, AdditionalInfoType};
pub use control_field::{ControlField1, ControlField2, Priority};
pub use device_management::{CemiErrorCode, DeviceManagementFrame};
pub use interface_object::InterfaceObjectType;
pub use link_layer::LinkLayerFrame;
pub use message_code::MessageCode;
pub use tpdu::{Apci, Tpci, Tpdu};
