//! Document-level types.

use super::{Package, Paragraph, StyleSheet, Table};
use crate::error::{Error, Result};
use crate::parser::xml::{XmlElement, XmlNode};

/// WordprocessingML main namespace.
pub const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A block-level item of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A body paragraph
    Paragraph(Paragraph),
    /// A body table
    Table(Table),
    /// Anything else (section properties, content controls, whitespace)
    Other(XmlNode),
}

impl Block {
    fn to_node(&self) -> XmlNode {
        match self {
            Block::Paragraph(p) => XmlNode::Element(p.to_element()),
            Block::Table(t) => XmlNode::Element(t.to_element()),
            Block::Other(node) => node.clone(),
        }
    }

    fn is_section_properties(&self) -> bool {
        matches!(self, Block::Other(XmlNode::Element(e)) if e.is("w:sectPr"))
    }
}

/// A loaded template: body blocks, paragraph styles and the rest of the
/// package.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    /// Body blocks in document order
    pub blocks: Vec<Block>,

    /// Paragraph style names
    pub styles: StyleSheet,

    /// Zip container parts (the main part's bytes are regenerated on save)
    pub package: Package,

    /// The `w:document` element with an emptied `w:body`
    root: XmlElement,
}

impl TemplateDocument {
    /// Create an empty document with a bare body.
    pub fn new() -> Self {
        let root = XmlElement::new("w:document")
            .with_attribute("xmlns:w", WORDPROCESSINGML_NS)
            .with_child(XmlElement::new("w:body"));
        Self {
            blocks: Vec::new(),
            styles: StyleSheet::new(),
            package: Package::new(),
            root,
        }
    }

    /// Build a document from a parsed `w:document` root element.
    pub fn from_root(mut root: XmlElement, styles: StyleSheet, package: Package) -> Result<Self> {
        let body = root
            .child_mut("w:body")
            .ok_or_else(|| Error::InvalidTemplate("document part has no w:body".to_string()))?;

        let blocks = std::mem::take(&mut body.children)
            .into_iter()
            .map(|node| match node {
                XmlNode::Element(e) if e.is("w:p") => Block::Paragraph(Paragraph::from_element(&e)),
                XmlNode::Element(e) if e.is("w:tbl") => Block::Table(Table::from_element(&e)),
                other => Block::Other(other),
            })
            .collect();

        Ok(Self {
            blocks,
            styles,
            package,
            root,
        })
    }

    /// Rebuild the `w:document` element with the current body.
    pub fn to_root(&self) -> XmlElement {
        let mut root = self.root.clone();
        if let Some(body) = root.child_mut("w:body") {
            body.children = self.blocks.iter().map(Block::to_node).collect();
        }
        root
    }

    /// Iterate over body paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Iterate mutably over body paragraphs in document order.
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Number of body paragraphs, blank ones included.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Iterate over body tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Display name of a paragraph's style.
    pub fn style_name(&self, paragraph: &Paragraph) -> &str {
        self.styles.resolve(paragraph.style_id())
    }

    /// Append a default-formatted paragraph at the end of the body.
    ///
    /// The paragraph goes before the body's final `w:sectPr`, which must
    /// stay last.
    pub fn add_paragraph(&mut self, text: &str) -> &mut Paragraph {
        let position = match self
            .blocks
            .iter()
            .rposition(|b| !matches!(b, Block::Other(XmlNode::Text(_))))
        {
            Some(i) if self.blocks[i].is_section_properties() => i,
            _ => self.blocks.len(),
        };

        self.blocks
            .insert(position, Block::Paragraph(Paragraph::with_text(text)));
        match &mut self.blocks[position] {
            Block::Paragraph(p) => p,
            _ => unreachable!("block was just inserted as a paragraph"),
        }
    }
}

impl Default for TemplateDocument {
    fn default() -> Self {
        Self::new()
    }
}
