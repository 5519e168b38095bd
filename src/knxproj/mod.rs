//! Building structure of a KNX project file.
//!
//! The model is filled from an [`XmlEventSource`], so any XML reader can be
//! plugged in. Lenient parsing skips unknown attributes and elements;
//! pedantic parsing rejects them.
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::knxproj::{Buildings, CompletionStatus, XmlEvent};
//!
//! let events = [
//!     XmlEvent::start("Buildings", &[]),
//!     XmlEvent::start("BuildingPart", &[("Id", "BP-1"), ("Name", "Office"), ("Type", "Floor")]),
//!     XmlEvent::end("BuildingPart"),
//!     XmlEvent::end("Buildings"),
//! ];
//!
//! let buildings = Buildings::parse(&mut events.into_iter(), true).unwrap();
//! let office = &buildings.building_parts[0];
//! assert_eq!(office.name, "Office");
//! assert_eq!(office.completion_status, CompletionStatus::Undefined);
//! ```

pub mod buildings;
pub mod xml;

pub use buildings::{
    BuildingPart, BuildingPartType, Buildings, CompletionStatus, Function, GroupAddressRef,
};
pub use xml::{Attribute, XmlEvent, XmlEventSource};
