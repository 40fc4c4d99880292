//! Minimal owned XML tree used for WordprocessingML parts.
//!
//! The tree keeps every node it reads (elements, text, comments, CDATA,
//! processing instructions) so a part that is parsed and written back
//! without edits keeps its content. Namespace prefixes are kept verbatim in
//! element and attribute names (`w:p`, `w:val`).

use crate::error::{Error, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// A node in the XML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// A child element
    Element(XmlElement),
    /// Unescaped character data
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content (raw)
    Comment(String),
    /// Processing instruction content (raw)
    ProcessingInstruction(String),
}

impl XmlNode {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// An XML element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Qualified element name, e.g. `w:p`
    pub name: String,
    /// Attributes as (qualified name, unescaped value), in document order
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Builder-style text append.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Check the qualified name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Get an attribute value by qualified name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    /// Iterate over child elements.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(name))
    }

    /// First child element with the given name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|n| match n {
            XmlNode::Element(e) if e.is(name) => Some(e),
            _ => None,
        })
    }

    /// Concatenated character data of direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let mut element = XmlElement::new(lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((lossy(attr.key.as_ref()), value));
    }
    Ok(element)
}

/// Parse an XML document and return its root element.
///
/// The XML declaration and any document type declaration are dropped;
/// nodes outside the root element are ignored.
pub fn parse(data: &[u8]) -> Result<XmlElement> {
    let mut reader = Reader::from_reader(data);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let node = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(element_from_start(&e)?);
                None
            }
            Event::Empty(e) => Some(XmlNode::Element(element_from_start(&e)?)),
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                Some(XmlNode::Element(element))
            }
            Event::Text(t) => Some(XmlNode::Text(t.unescape()?.into_owned())),
            Event::CData(c) => Some(XmlNode::CData(lossy(&c.into_inner()))),
            Event::Comment(c) => Some(XmlNode::Comment(lossy(&c))),
            Event::PI(p) => Some(XmlNode::ProcessingInstruction(lossy(&p))),
            Event::Eof => break,
            _ => None,
        };

        if let Some(node) = node {
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => {
                    if let XmlNode::Element(e) = node {
                        if root.is_none() {
                            root = Some(e);
                        }
                    }
                }
            }
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(Error::Xml(format!(
            "unexpected end of document inside <{}>",
            stack[stack.len() - 1].name
        )));
    }

    root.ok_or_else(|| Error::Xml("document has no root element".to_string()))
}

/// Serialize a root element as a standalone XML document.
pub fn write(root: &XmlElement) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.get_mut().extend_from_slice(b"\r\n");
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            XmlNode::CData(c) => writer.write_event(Event::CData(BytesCData::new(c.as_str())))?,
            XmlNode::Comment(c) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?
            }
            XmlNode::ProcessingInstruction(p) => {
                writer.write_event(Event::PI(BytesText::from_escaped(p.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let xml = br#"<?xml version="1.0"?><w:p w:rsidR="00AB"><w:r><w:t xml:space="preserve"> Hi &amp; bye </w:t></w:r><w:r/></w:p>"#;
        let root = parse(xml).unwrap();

        assert_eq!(root.name, "w:p");
        assert_eq!(root.attribute("w:rsidR"), Some("00AB"));
        assert_eq!(root.elements().count(), 2);

        let t = root.child("w:r").unwrap().child("w:t").unwrap();
        assert_eq!(t.text(), " Hi & bye ");
        assert_eq!(t.attribute("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_write_escapes_and_roundtrips() {
        let root = XmlElement::new("w:t")
            .with_attribute("w:val", "a\"b")
            .with_text("x < y & z");
        let bytes = write(&root).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        assert!(text.starts_with("<?xml"));
        assert!(text.contains("x &lt; y &amp; z"));
        assert_eq!(parse(&bytes).unwrap(), root);
    }

    #[test]
    fn test_empty_element_written_self_closing() {
        let bytes = write(&XmlElement::new("w:tab")).unwrap();
        assert!(String::from_utf8(bytes).unwrap().ends_with("<w:tab/>"));
    }

    #[test]
    fn test_unbalanced_document_is_error() {
        assert!(parse(b"<w:p><w:r>").is_err());
        assert!(parse(b"").is_err());
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut e = XmlElement::new("w:pStyle").with_attribute("w:val", "Title");
        e.set_attribute("w:val", "Heading1");
        assert_eq!(e.attributes.len(), 1);
        assert_eq!(e.attribute("w:val"), Some("Heading1"));
    }
}
