//! Element stream consumed by the project model.
//!
//! The crate does not parse XML text. Any reader able to produce
//! [`XmlEvent`]s can feed the model, including a plain iterator of events.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{KnxError, Result};

/// Longest `Name`, `Number` or `Role` value, in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// One `name="value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local attribute name
    pub name: String,
    /// Unescaped value
    pub value: String,
}

impl Attribute {
    /// Build an attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Structural XML event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// Opening tag
    StartElement {
        /// Local element name
        name: String,
        /// Attributes in document order
        attributes: Vec<Attribute>,
    },
    /// Closing tag; empty elements produce a start and an end
    EndElement {
        /// Local element name
        name: String,
    },
    /// Character data between tags
    Text(String),
}

impl XmlEvent {
    /// Opening tag with attributes given as pairs.
    pub fn start(name: &str, attributes: &[(&str, &str)]) -> Self {
        Self::StartElement {
            name: name.into(),
            attributes: attributes
                .iter()
                .map(|&(name, value)| Attribute::new(name, value))
                .collect(),
        }
    }

    /// Closing tag.
    pub fn end(name: &str) -> Self {
        Self::EndElement { name: name.into() }
    }
}

/// Producer of [`XmlEvent`]s.
pub trait XmlEventSource {
    /// Next event, `None` at end of input.
    fn next_event(&mut self) -> Option<XmlEvent>;
}

impl<I: Iterator<Item = XmlEvent>> XmlEventSource for I {
    fn next_event(&mut self) -> Option<XmlEvent> {
        self.next()
    }
}

/// Attribute lookup for one element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Attributes<'a> {
    list: &'a [Attribute],
    pedantic: bool,
}

impl<'a> Attributes<'a> {
    pub(crate) fn new(list: &'a [Attribute], pedantic: bool) -> Self {
        Self { list, pedantic }
    }

    /// In pedantic mode, reject names outside `known`.
    pub(crate) fn expect_only(&self, known: &[&str]) -> Result<()> {
        if !self.pedantic {
            return Ok(());
        }
        match self.list.iter().find(|a| !known.contains(&a.name.as_str())) {
            Some(unknown) => {
                knx_log!(debug, "unknown attribute {}", unknown.name.as_str());
                Err(KnxError::unknown_attribute())
            }
            None => Ok(()),
        }
    }

    pub(crate) fn optional(&self, name: &str) -> Option<String> {
        self.list.iter().find(|a| a.name == name).map(|a| a.value.clone())
    }

    pub(crate) fn required(&self, name: &str) -> Result<String> {
        self.optional(name).ok_or_else(|| {
            knx_log!(debug, "missing attribute {}", name);
            KnxError::missing_attribute()
        })
    }

    /// Optional value limited to [`MAX_NAME_CHARS`].
    pub(crate) fn bounded(&self, name: &str) -> Result<Option<String>> {
        match self.optional(name) {
            Some(value) if value.chars().count() > MAX_NAME_CHARS => {
                Err(KnxError::invalid_attribute())
            }
            value => Ok(value),
        }
    }

    /// Required `Name`.
    pub(crate) fn name(&self) -> Result<String> {
        self.bounded("Name")?.ok_or_else(KnxError::missing_attribute)
    }

    /// Optional `Puid`.
    pub(crate) fn puid(&self) -> Result<Option<i32>> {
        self.optional("Puid")
            .map(|value| value.trim().parse().map_err(|_err| KnxError::invalid_attribute()))
            .transpose()
    }

    /// Optional attribute decoded by `parse`, malformed values rejected.
    pub(crate) fn parsed<T>(&self, name: &str, parse: fn(&str) -> Option<T>) -> Result<Option<T>> {
        self.optional(name)
            .map(|value| parse(&value).ok_or_else(KnxError::invalid_attribute))
            .transpose()
    }
}

/// An element of the project model.
pub(crate) trait ProjectElement: Default {
    /// Element name.
    const TAG: &'static str;

    /// Fill fields from the opening tag.
    fn read_attributes(&mut self, attributes: &Attributes<'_>) -> Result<()>;

    /// Consume a child element. Returns `false` for children the element
    /// does not know, which are skipped or rejected by the caller.
    fn read_child<S: XmlEventSource + ?Sized>(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        source: &mut S,
        pedantic: bool,
    ) -> Result<bool>;
}

/// Read the next opening tag, which must be `E::TAG`, and the element body.
pub(crate) fn parse_root<E, S>(element: &mut E, source: &mut S, pedantic: bool) -> Result<()>
where
    E: ProjectElement,
    S: XmlEventSource + ?Sized,
{
    loop {
        match source.next_event() {
            Some(XmlEvent::Text(_)) => {}
            Some(XmlEvent::StartElement { name, attributes }) if name == E::TAG => {
                *element = E::default();
                return read_element(element, &attributes, source, pedantic);
            }
            Some(_) => return Err(KnxError::unexpected_element()),
            None => return Err(KnxError::unexpected_end()),
        }
    }
}

/// Read attributes and children of an element whose opening tag was
/// already consumed, up to and including its closing tag.
pub(crate) fn read_element<E, S>(
    element: &mut E,
    attributes: &[Attribute],
    source: &mut S,
    pedantic: bool,
) -> Result<()>
where
    E: ProjectElement,
    S: XmlEventSource + ?Sized,
{
    element.read_attributes(&Attributes::new(attributes, pedantic))?;
    loop {
        match source.next_event() {
            None => return Err(KnxError::unexpected_end()),
            Some(XmlEvent::Text(_)) => {}
            Some(XmlEvent::EndElement { name }) => {
                return if name == E::TAG {
                    Ok(())
                } else {
                    Err(KnxError::unexpected_element())
                };
            }
            Some(XmlEvent::StartElement { name, attributes }) => {
                if element.read_child(&name, &attributes, source, pedantic)? {
                    continue;
                }
                if pedantic {
                    knx_log!(debug, "unexpected element {} in {}", name.as_str(), E::TAG);
                    return Err(KnxError::unexpected_element());
                }
                skip_element(source)?;
            }
        }
    }
}

/// Consume events up to the closing tag of an element whose opening tag was
/// already read.
pub(crate) fn skip_element<S: XmlEventSource + ?Sized>(source: &mut S) -> Result<()> {
    let mut depth = 1usize;
    while depth > 0 {
        match source.next_event() {
            Some(XmlEvent::StartElement { .. }) => depth += 1,
            Some(XmlEvent::EndElement { .. }) => depth -= 1,
            Some(XmlEvent::Text(_)) => {}
            None => return Err(KnxError::unexpected_end()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_nested() {
        let mut events = [
            XmlEvent::start("A", &[]),
            XmlEvent::Text("x".into()),
            XmlEvent::end("A"),
            XmlEvent::end("Outer"),
            XmlEvent::start("Next", &[]),
        ]
        .into_iter();
        skip_element(&mut events).unwrap();
        assert_eq!(events.next_event(), Some(XmlEvent::start("Next", &[])));

        let mut truncated = [XmlEvent::start("A", &[])].into_iter();
        let result = skip_element(&mut truncated);
        assert!(matches!(result, Err(KnxError::Project(ref e)) if e.is_unexpected_end()));
    }

    #[test]
    fn test_attributes() {
        let long = "n".repeat(256);
        let list = [
            Attribute::new("Id", "P-1"),
            Attribute::new("Puid", "12"),
            Attribute::new("Number", long.as_str()),
        ];
        let lenient = Attributes::new(&list, false);
        assert_eq!(lenient.required("Id").unwrap(), "P-1");
        assert_eq!(lenient.puid().unwrap(), Some(12));
        lenient.expect_only(&["Id"]).unwrap();
        assert!(matches!(
            lenient.bounded("Number"),
            Err(KnxError::Project(ref e)) if e.is_invalid_attribute()
        ));
        assert!(matches!(
            lenient.name(),
            Err(KnxError::Project(ref e)) if e.is_missing_attribute()
        ));

        let pedantic = Attributes::new(&list, true);
        assert!(matches!(
            pedantic.expect_only(&["Id", "Puid"]),
            Err(KnxError::Project(ref e)) if e.is_unknown_attribute()
        ));
    }
}
