//! Paragraph and run types.
//!
//! A [`Paragraph`] mirrors a `w:p` element: optional paragraph properties,
//! then inline content in document order. Runs are decoded into
//! [`TextRun`]; everything else (bookmarks, hyperlinks, proofing marks) is
//! kept as raw XML so it survives a save.

use crate::parser::xml::{XmlElement, XmlNode};

/// A body or cell paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// Attributes of the `w:p` element (revision ids etc.)
    pub attributes: Vec<(String, String)>,

    /// Paragraph properties (`w:pPr`)
    pub properties: Option<XmlElement>,

    /// Inline content in document order
    pub content: Vec<InlineContent>,
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineContent {
    /// A formatted run (`w:r`)
    Run(TextRun),

    /// Any other inline node, kept verbatim
    Other(XmlNode),
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph holding one unformatted run.
    pub fn with_text(text: &str) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Decode a `w:p` element.
    pub fn from_element(element: &XmlElement) -> Self {
        let mut paragraph = Paragraph {
            attributes: element.attributes.clone(),
            properties: None,
            content: Vec::new(),
        };

        for node in &element.children {
            match node {
                XmlNode::Element(e) if e.is("w:pPr") => paragraph.properties = Some(e.clone()),
                XmlNode::Element(e) if e.is("w:r") => {
                    paragraph.content.push(InlineContent::Run(TextRun::from_element(e)))
                }
                other => paragraph.content.push(InlineContent::Other(other.clone())),
            }
        }

        paragraph
    }

    /// Encode back to a `w:p` element.
    pub fn to_element(&self) -> XmlElement {
        let mut element = XmlElement::new("w:p");
        element.attributes = self.attributes.clone();
        if let Some(ref props) = self.properties {
            element.children.push(XmlNode::Element(props.clone()));
        }
        for item in &self.content {
            match item {
                InlineContent::Run(run) => element.children.push(XmlNode::Element(run.to_element())),
                InlineContent::Other(node) => element.children.push(node.clone()),
            }
        }
        element
    }

    /// Append a run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Run(run));
    }

    /// Iterate over the paragraph's direct runs.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Run(r) => Some(r),
            _ => None,
        })
    }

    /// Iterate mutably over the paragraph's direct runs.
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.content.iter_mut().filter_map(|c| match c {
            InlineContent::Run(r) => Some(r),
            _ => None,
        })
    }

    /// Number of direct runs.
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Visible text: direct runs plus runs inside hyperlinks.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for item in &self.content {
            match item {
                InlineContent::Run(run) => text.push_str(&run.text()),
                InlineContent::Other(XmlNode::Element(e)) if e.is("w:hyperlink") => {
                    for r in e.elements().filter(|c| c.is("w:r")) {
                        text.push_str(&TextRun::from_element(r).text());
                    }
                }
                InlineContent::Other(_) => {}
            }
        }
        text
    }

    /// Check if the paragraph has no visible text after trimming.
    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Style id from `w:pPr/w:pStyle`, if any.
    pub fn style_id(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.child("w:pStyle"))
            .and_then(|s| s.attribute("w:val"))
    }
}

/// Content of a run, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    /// `w:t`
    Text(String),
    /// `w:tab`
    Tab,
    /// `w:br`, with its break type when given
    Break(Option<String>),
    /// `w:cr`
    CarriageReturn,
    /// Anything else (drawings, field characters, symbols)
    Other(XmlElement),
}

/// A run of text sharing one formatting definition (`w:r`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    /// Attributes of the `w:r` element
    pub attributes: Vec<(String, String)>,

    /// Run formatting (`w:rPr`): font, bold, size, colour
    pub properties: Option<XmlElement>,

    /// Run content
    pub content: Vec<RunContent>,
}

impl TextRun {
    /// Create an unformatted run with the given text.
    pub fn new(text: &str) -> Self {
        let mut run = Self::default();
        run.set_text(text);
        run
    }

    /// Decode a `w:r` element.
    pub fn from_element(element: &XmlElement) -> Self {
        let mut run = TextRun {
            attributes: element.attributes.clone(),
            properties: None,
            content: Vec::new(),
        };

        for child in element.elements() {
            let content = match child.name.as_str() {
                "w:rPr" => {
                    run.properties = Some(child.clone());
                    continue;
                }
                "w:t" => RunContent::Text(child.text()),
                "w:tab" => RunContent::Tab,
                "w:br" => RunContent::Break(child.attribute("w:type").map(str::to_string)),
                "w:cr" => RunContent::CarriageReturn,
                _ => RunContent::Other(child.clone()),
            };
            run.content.push(content);
        }

        run
    }

    /// Encode back to a `w:r` element.
    pub fn to_element(&self) -> XmlElement {
        let mut element = XmlElement::new("w:r");
        element.attributes = self.attributes.clone();
        if let Some(ref props) = self.properties {
            element.children.push(XmlNode::Element(props.clone()));
        }
        for content in &self.content {
            let child = match content {
                RunContent::Text(t) => {
                    let mut e = XmlElement::new("w:t");
                    if t.starts_with(char::is_whitespace) || t.ends_with(char::is_whitespace) {
                        e.set_attribute("xml:space", "preserve");
                    }
                    e.with_text(t.as_str())
                }
                RunContent::Tab => XmlElement::new("w:tab"),
                RunContent::Break(kind) => match kind {
                    Some(k) => XmlElement::new("w:br").with_attribute("w:type", k.as_str()),
                    None => XmlElement::new("w:br"),
                },
                RunContent::CarriageReturn => XmlElement::new("w:cr"),
                RunContent::Other(e) => e.clone(),
            };
            element.children.push(XmlNode::Element(child));
        }
        element
    }

    /// Visible text of the run.
    ///
    /// Tabs read as `\t`; line breaks and carriage returns as `\n`. Page
    /// and column breaks carry no text.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for content in &self.content {
            match content {
                RunContent::Text(t) => text.push_str(t),
                RunContent::Tab => text.push('\t'),
                RunContent::Break(None) => text.push('\n'),
                RunContent::Break(Some(kind)) if kind == "textWrapping" => text.push('\n'),
                RunContent::Break(Some(_)) => {}
                RunContent::CarriageReturn => text.push('\n'),
                RunContent::Other(e) if e.is("w:noBreakHyphen") => text.push('-'),
                RunContent::Other(_) => {}
            }
        }
        text
    }

    /// Replace all run content with `text`, keeping the run formatting.
    ///
    /// `\t` becomes a tab element, `\n` and `\r` become line breaks.
    pub fn set_text(&mut self, text: &str) {
        self.content.clear();
        let mut pending = String::new();
        for ch in text.chars() {
            let special = match ch {
                '\t' => Some(RunContent::Tab),
                '\n' | '\r' => Some(RunContent::Break(None)),
                _ => None,
            };
            match special {
                Some(content) => {
                    if !pending.is_empty() {
                        self.content
                            .push(RunContent::Text(std::mem::take(&mut pending)));
                    }
                    self.content.push(content);
                }
                None => pending.push(ch),
            }
        }
        if !pending.is_empty() {
            self.content.push(RunContent::Text(pending));
        }
    }

    /// Check if this run has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::xml;

    fn paragraph(xml_text: &str) -> Paragraph {
        Paragraph::from_element(&xml::parse(xml_text.as_bytes()).unwrap())
    }

    #[test]
    fn test_plain_text_concatenates_runs() {
        let p = paragraph(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Date of</w:t></w:r><w:r><w:t xml:space="preserve"> Loss:</w:t></w:r></w:p>"#,
        );
        assert_eq!(p.plain_text(), "Date of Loss:");
        assert_eq!(p.run_count(), 2);
        assert_eq!(p.style_id(), Some("Heading1"));
    }

    #[test]
    fn test_plain_text_includes_hyperlinks() {
        let p = paragraph(
            r#"<w:p><w:r><w:t>See </w:t></w:r><w:hyperlink r:id="rId5"><w:r><w:t>claim portal</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert_eq!(p.plain_text(), "See claim portal");
        assert_eq!(p.run_count(), 1);
    }

    #[test]
    fn test_run_text_special_content() {
        let p = paragraph(
            r#"<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t><w:br w:type="page"/><w:noBreakHyphen/></w:r></w:p>"#,
        );
        assert_eq!(p.plain_text(), "A\tB\nC-");
    }

    #[test]
    fn test_set_text_keeps_properties() {
        let p = paragraph(r#"<w:p><w:r><w:rPr><w:sz w:val="28"/></w:rPr><w:t>old</w:t></w:r></w:p>"#);
        let mut run = p.runs().next().unwrap().clone();
        run.set_text("new\tvalue");

        assert_eq!(run.text(), "new\tvalue");
        assert!(run.properties.is_some());
        assert_eq!(run.content.len(), 3);
    }

    #[test]
    fn test_set_text_empty_clears_content() {
        let mut run = TextRun::new("text");
        run.set_text("");
        assert!(run.content.is_empty());
        assert!(run.is_empty());
    }

    #[test]
    fn test_element_roundtrip() {
        let source = r#"<w:p w:rsidR="001"><w:pPr><w:jc w:val="center"/></w:pPr><w:bookmarkStart w:id="0" w:name="loss"/><w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve"> padded </w:t></w:r><w:bookmarkEnd w:id="0"/></w:p>"#;
        let element = xml::parse(source.as_bytes()).unwrap();
        let p = Paragraph::from_element(&element);
        assert_eq!(p.to_element(), element);
    }

    #[test]
    fn test_blank_paragraph() {
        assert!(paragraph("<w:p><w:r><w:t>   </w:t></w:r></w:p>").is_blank());
        assert!(paragraph("<w:p/>").is_blank());
        assert!(!paragraph("<w:p><w:r><w:t>x</w:t></w:r></w:p>").is_blank());
    }
}
