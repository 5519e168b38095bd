//! `Buildings` section of a project: the physical structure of an
//! installation and the functions placed in it.
//!
//! ```text
//! Buildings
//! └── BuildingPart (Type="Building")
//!     ├── BuildingPart (Type="Floor")
//!     │   └── BuildingPart (Type="Room")
//!     │       ├── DeviceInstanceRef
//!     │       └── Function
//!     │           └── GroupAddressRef
//!     └── ...
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use super::xml::{self, Attribute, Attributes, ProjectElement, XmlEventSource};
use crate::error::Result;

/// Progress marker carried by building parts and functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionStatus {
    #[default]
    Undefined,
    Editing,
    FinishedDesign,
    FinishedCommissioning,
    Tested,
    Accepted,
    Locked,
}

impl CompletionStatus {
    /// Decode the attribute value.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Undefined" => Self::Undefined,
            "Editing" => Self::Editing,
            "FinishedDesign" => Self::FinishedDesign,
            "FinishedCommissioning" => Self::FinishedCommissioning,
            "Tested" => Self::Tested,
            "Accepted" => Self::Accepted,
            "Locked" => Self::Locked,
            _ => return None,
        })
    }

    /// Attribute value.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Editing => "Editing",
            Self::FinishedDesign => "FinishedDesign",
            Self::FinishedCommissioning => "FinishedCommissioning",
            Self::Tested => "Tested",
            Self::Accepted => "Accepted",
            Self::Locked => "Locked",
        }
    }
}

/// Kind of a [`BuildingPart`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingPartType {
    #[default]
    Building,
    BuildingPart,
    Floor,
    Room,
    DistributionBoard,
    Stairway,
    Corridor,
}

impl BuildingPartType {
    /// Decode the `Type` attribute.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Building" => Self::Building,
            "BuildingPart" => Self::BuildingPart,
            "Floor" => Self::Floor,
            "Room" => Self::Room,
            "DistributionBoard" => Self::DistributionBoard,
            "Stairway" => Self::Stairway,
            "Corridor" => Self::Corridor,
            _ => return None,
        })
    }
}

/// Reference from a function to a group address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupAddressRef {
    pub id: String,
    pub name: String,
    /// Id of the referenced group address
    pub ref_id: String,
    pub role: Option<String>,
    pub puid: Option<i32>,
}

impl GroupAddressRef {
    /// Read a `GroupAddressRef` element from `source`.
    ///
    /// # Errors
    ///
    /// Returns a project error on a missing or malformed attribute, a
    /// truncated stream, or, when `pedantic`, any unknown attribute or child.
    pub fn parse_element<S>(&mut self, source: &mut S, pedantic: bool) -> Result<()>
    where
        S: XmlEventSource + ?Sized,
    {
        xml::parse_root(self, source, pedantic)
    }
}

impl ProjectElement for GroupAddressRef {
    const TAG: &'static str = "GroupAddressRef";

    fn read_attributes(&mut self, attributes: &Attributes<'_>) -> Result<()> {
        attributes.expect_only(&["Id", "Name", "RefId", "Role", "Puid"])?;
        self.id = attributes.required("Id")?;
        self.name = attributes.name()?;
        self.ref_id = attributes.required("RefId")?;
        self.role = attributes.bounded("Role")?;
        self.puid = attributes.puid()?;
        Ok(())
    }

    fn read_child<S: XmlEventSource + ?Sized>(
        &mut self,
        _name: &str,
        _attributes: &[Attribute],
        _source: &mut S,
        _pedantic: bool,
    ) -> Result<bool> {
        Ok(false)
    }
}

/// Function placed in a building part, such as a dimmed light.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub id: String,
    pub name: String,
    /// Function type, for example `SwitchableLight`
    pub function_type: Option<String>,
    pub number: Option<String>,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub completion_status: CompletionStatus,
    pub default_group_range: Option<String>,
    pub puid: Option<i32>,
    pub group_address_refs: Vec<GroupAddressRef>,
}

impl Function {
    /// Read a `Function` element from `source`.
    ///
    /// # Errors
    ///
    /// See [`GroupAddressRef::parse_element`].
    pub fn parse_element<S>(&mut self, source: &mut S, pedantic: bool) -> Result<()>
    where
        S: XmlEventSource + ?Sized,
    {
        xml::parse_root(self, source, pedantic)
    }
}

impl ProjectElement for Function {
    const TAG: &'static str = "Function";

    fn read_attributes(&mut self, attributes: &Attributes<'_>) -> Result<()> {
        attributes.expect_only(&[
            "Id",
            "Name",
            "Type",
            "Number",
            "Comment",
            "Description",
            "CompletionStatus",
            "DefaultGroupRange",
            "Puid",
        ])?;
        self.id = attributes.required("Id")?;
        self.name = attributes.name()?;
        self.function_type = attributes.optional("Type");
        self.number = attributes.bounded("Number")?;
        self.comment = attributes.optional("Comment");
        self.description = attributes.optional("Description");
        self.completion_status = attributes
            .parsed("CompletionStatus", CompletionStatus::from_name)?
            .unwrap_or_default();
        self.default_group_range = attributes.optional("DefaultGroupRange");
        self.puid = attributes.puid()?;
        Ok(())
    }

    fn read_child<S: XmlEventSource + ?Sized>(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        source: &mut S,
        pedantic: bool,
    ) -> Result<bool> {
        if name != GroupAddressRef::TAG {
            return Ok(false);
        }
        let mut reference = GroupAddressRef::default();
        xml::read_element(&mut reference, attributes, source, pedantic)?;
        self.group_address_refs.push(reference);
        Ok(true)
    }
}

/// Node of the building tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingPart {
    pub id: String,
    pub name: String,
    pub part_type: BuildingPartType,
    pub number: Option<String>,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub completion_status: CompletionStatus,
    pub default_line: Option<String>,
    pub puid: Option<i32>,
    pub building_parts: Vec<BuildingPart>,
    /// Ids of the devices mounted here
    pub device_instance_refs: Vec<String>,
    pub functions: Vec<Function>,
}

impl BuildingPart {
    /// Read a `BuildingPart` element, children included, from `source`.
    ///
    /// # Errors
    ///
    /// See [`GroupAddressRef::parse_element`].
    pub fn parse_element<S>(&mut self, source: &mut S, pedantic: bool) -> Result<()>
    where
        S: XmlEventSource + ?Sized,
    {
        xml::parse_root(self, source, pedantic)
    }

    /// Depth-first walk over this part and all nested parts.
    pub fn walk(&self) -> Vec<&BuildingPart> {
        let mut parts = Vec::from([self]);
        for child in &self.building_parts {
            parts.extend(child.walk());
        }
        parts
    }
}

impl ProjectElement for BuildingPart {
    const TAG: &'static str = "BuildingPart";

    fn read_attributes(&mut self, attributes: &Attributes<'_>) -> Result<()> {
        attributes.expect_only(&[
            "Id",
            "Name",
            "Type",
            "Number",
            "Comment",
            "Description",
            "CompletionStatus",
            "DefaultLine",
            "Puid",
        ])?;
        self.id = attributes.required("Id")?;
        self.name = attributes.name()?;
        self.part_type = attributes
            .parsed("Type", BuildingPartType::from_name)?
            .ok_or_else(crate::error::KnxError::missing_attribute)?;
        self.number = attributes.bounded("Number")?;
        self.comment = attributes.optional("Comment");
        self.description = attributes.optional("Description");
        self.completion_status = attributes
            .parsed("CompletionStatus", CompletionStatus::from_name)?
            .unwrap_or_default();
        self.default_line = attributes.optional("DefaultLine");
        self.puid = attributes.puid()?;
        Ok(())
    }

    fn read_child<S: XmlEventSource + ?Sized>(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        source: &mut S,
        pedantic: bool,
    ) -> Result<bool> {
        match name {
            "BuildingPart" => {
                let mut part = BuildingPart::default();
                xml::read_element(&mut part, attributes, source, pedantic)?;
                self.building_parts.push(part);
            }
            "Function" => {
                let mut function = Function::default();
                xml::read_element(&mut function, attributes, source, pedantic)?;
                self.functions.push(function);
            }
            "DeviceInstanceRef" => {
                let attributes = Attributes::new(attributes, pedantic);
                attributes.expect_only(&["RefId"])?;
                self.device_instance_refs.push(attributes.required("RefId")?);
                xml::skip_element(source)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Root of the building structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buildings {
    pub building_parts: Vec<BuildingPart>,
}

impl Buildings {
    /// Read a `Buildings` element from `source`.
    ///
    /// # Errors
    ///
    /// See [`GroupAddressRef::parse_element`].
    pub fn parse_element<S>(&mut self, source: &mut S, pedantic: bool) -> Result<()>
    where
        S: XmlEventSource + ?Sized,
    {
        xml::parse_root(self, source, pedantic)
    }

    /// Parse a fresh `Buildings` element.
    ///
    /// # Errors
    ///
    /// See [`GroupAddressRef::parse_element`].
    pub fn parse<S>(source: &mut S, pedantic: bool) -> Result<Self>
    where
        S: XmlEventSource + ?Sized,
    {
        let mut buildings = Self::default();
        buildings.parse_element(source, pedantic)?;
        Ok(buildings)
    }

    /// Every function in the tree, depth first.
    pub fn functions(&self) -> Vec<&Function> {
        self.building_parts
            .iter()
            .flat_map(BuildingPart::walk)
            .flat_map(|part| part.functions.iter())
            .collect()
    }
}

impl ProjectElement for Buildings {
    const TAG: &'static str = "Buildings";

    fn read_attributes(&mut self, attributes: &Attributes<'_>) -> Result<()> {
        attributes.expect_only(&[])
    }

    fn read_child<S: XmlEventSource + ?Sized>(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        source: &mut S,
        pedantic: bool,
    ) -> Result<bool> {
        if name != BuildingPart::TAG {
            return Ok(false);
        }
        let mut part = BuildingPart::default();
        xml::read_element(&mut part, attributes, source, pedantic)?;
        self.building_parts.push(part);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KnxError;
    use crate::knxproj::xml::XmlEvent;

    fn project() -> Vec<XmlEvent> {
        Vec::from([
            XmlEvent::start("Buildings", &[]),
            XmlEvent::start(
                "BuildingPart",
                &[("Id", "P-0001-0_BP-1"), ("Name", "House"), ("Type", "Building")],
            ),
            XmlEvent::start(
                "BuildingPart",
                &[
                    ("Id", "P-0001-0_BP-2"),
                    ("Name", "Kitchen"),
                    ("Type", "Room"),
                    ("CompletionStatus", "Tested"),
                    ("Puid", "7"),
                ],
            ),
            XmlEvent::start("DeviceInstanceRef", &[("RefId", "P-0001-0_DI-3")]),
            XmlEvent::end("DeviceInstanceRef"),
            XmlEvent::start(
                "Function",
                &[("Id", "P-0001-0_F-1"), ("Name", "Ceiling"), ("Type", "SwitchableLight")],
            ),
            XmlEvent::start(
                "GroupAddressRef",
                &[
                    ("Id", "P-0001-0_F-1_GR-1"),
                    ("Name", "Switch"),
                    ("RefId", "P-0001-0_GA-1"),
                    ("Role", "SwitchOnOff"),
                ],
            ),
            XmlEvent::end("GroupAddressRef"),
            XmlEvent::end("Function"),
            XmlEvent::start("Comment", &[]),
            XmlEvent::Text("vendor extension".into()),
            XmlEvent::end("Comment"),
            XmlEvent::end("BuildingPart"),
            XmlEvent::end("BuildingPart"),
            XmlEvent::end("Buildings"),
        ])
    }

    #[test]
    fn test_parse_tree() {
        let buildings = Buildings::parse(&mut project().into_iter(), false).unwrap();
        assert_eq!(buildings.building_parts.len(), 1);

        let house = &buildings.building_parts[0];
        assert_eq!(house.name, "House");
        assert_eq!(house.part_type, BuildingPartType::Building);
        assert_eq!(house.completion_status, CompletionStatus::Undefined);

        let kitchen = &house.building_parts[0];
        assert_eq!(kitchen.part_type, BuildingPartType::Room);
        assert_eq!(kitchen.completion_status, CompletionStatus::Tested);
        assert_eq!(kitchen.puid, Some(7));
        assert_eq!(kitchen.device_instance_refs, ["P-0001-0_DI-3"]);
        assert_eq!(house.walk().len(), 2);

        let functions = buildings.functions();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].function_type.as_deref(), Some("SwitchableLight"));
        let reference = &functions[0].group_address_refs[0];
        assert_eq!(reference.ref_id, "P-0001-0_GA-1");
        assert_eq!(reference.role.as_deref(), Some("SwitchOnOff"));
    }

    #[test]
    fn test_pedantic_rejects_unknown_child() {
        let result = Buildings::parse(&mut project().into_iter(), true);
        assert!(matches!(result, Err(KnxError::Project(ref e)) if e.is_unexpected_element()));
    }

    #[test]
    fn test_pedantic_rejects_unknown_attribute() {
        let events = [
            XmlEvent::start(
                "GroupAddressRef",
                &[("Id", "a"), ("Name", "b"), ("RefId", "c"), ("X", "")],
            ),
            XmlEvent::end("GroupAddressRef"),
        ];
        let mut reference = GroupAddressRef::default();
        let result = reference.parse_element(&mut events.clone().into_iter(), true);
        assert!(matches!(result, Err(KnxError::Project(ref e)) if e.is_unknown_attribute()));

        reference.parse_element(&mut events.into_iter(), false).unwrap();
        assert_eq!(reference.ref_id, "c");
    }

    #[test]
    fn test_required_attributes() {
        let events = [
            XmlEvent::start("BuildingPart", &[("Id", "a"), ("Name", "b")]),
            XmlEvent::end("BuildingPart"),
        ];
        let result = BuildingPart::default().parse_element(&mut events.into_iter(), false);
        assert!(matches!(result, Err(KnxError::Project(ref e)) if e.is_missing_attribute()));

        let long = "x".repeat(256);
        let events = [
            XmlEvent::start("Function", &[("Id", "a"), ("Name", long.as_str())]),
            XmlEvent::end("Function"),
        ];
        let result = Function::default().parse_element(&mut events.into_iter(), false);
        assert!(matches!(result, Err(KnxError::Project(ref e)) if e.is_invalid_attribute()));
    }

    #[test]
    fn test_truncated_stream() {
        let mut events = project();
        events.truncate(5);
        let result = Buildings::parse(&mut events.into_iter(), false);
        assert!(matches!(result, Err(KnxError::Project(ref e)) if e.is_unexpected_end()));
    }
}
