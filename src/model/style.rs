//! Paragraph style names from `word/styles.xml`.

use crate::parser::xml::XmlElement;
use std::collections::HashMap;

/// Name reported when no style information is available.
pub const FALLBACK_STYLE_NAME: &str = "Normal";

/// Lookup from paragraph style id to display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    names: HashMap<String, String>,
    default_style_id: Option<String>,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read paragraph styles from a parsed `w:styles` element.
    pub fn from_element(styles: &XmlElement) -> Self {
        let mut sheet = Self::new();
        for style in styles.elements().filter(|e| e.is("w:style")) {
            if style.attribute("w:type") != Some("paragraph") {
                continue;
            }
            let Some(id) = style.attribute("w:styleId") else {
                continue;
            };
            if let Some(name) = style.child("w:name").and_then(|n| n.attribute("w:val")) {
                sheet.names.insert(id.to_string(), ui_name(name).to_string());
            }
            if matches!(style.attribute("w:default"), Some("1") | Some("true")) {
                sheet.default_style_id = Some(id.to_string());
            }
        }
        sheet
    }

    /// Register a style by hand.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Mark a style id as the default paragraph style.
    pub fn set_default(&mut self, id: impl Into<String>) {
        self.default_style_id = Some(id.into());
    }

    /// Display name of the default paragraph style, if declared.
    pub fn default_name(&self) -> Option<&str> {
        self.default_style_id
            .as_deref()
            .and_then(|id| self.names.get(id))
            .map(String::as_str)
    }

    /// Resolve a paragraph's style id to a display name.
    ///
    /// Unknown or missing ids fall back to the default paragraph style, then
    /// to `"Normal"`.
    pub fn resolve(&self, style_id: Option<&str>) -> &str {
        style_id
            .and_then(|id| self.names.get(id))
            .map(String::as_str)
            .or_else(|| self.default_name())
            .unwrap_or(FALLBACK_STYLE_NAME)
    }
}

/// Built-in styles are stored lower-case in the XML but shown capitalised
/// in Word's UI.
fn ui_name(name: &str) -> &str {
    match name {
        "caption" => "Caption",
        "footer" => "Footer",
        "header" => "Header",
        "heading 1" => "Heading 1",
        "heading 2" => "Heading 2",
        "heading 3" => "Heading 3",
        "heading 4" => "Heading 4",
        "heading 5" => "Heading 5",
        "heading 6" => "Heading 6",
        "heading 7" => "Heading 7",
        "heading 8" => "Heading 8",
        "heading 9" => "Heading 9",
        other => other,
    }
}
