//! Template structure analysis.
//!
//! Each non-blank body paragraph is classified by the shape of its trimmed
//! text. The classification is a heuristic used to brief the completion
//! service; it never affects how paragraphs are populated.

use serde::Serialize;

use crate::model::TemplateDocument;
use crate::render::truncate_chars;

/// Substrings that mark a paragraph as a section header (case-sensitive).
pub const HEADER_KEYWORDS: [&str; 6] = [
    "Dwelling",
    "Roof",
    "Elevation",
    "Interior",
    "Contents",
    "Review",
];

/// Characters of paragraph text kept in a descriptor.
pub const SNIPPET_CHARS: usize = 100;

/// Descriptors included in the structure summary.
pub const SUMMARY_DESCRIPTORS: usize = 30;

/// Characters of each snippet shown in the structure summary.
pub const SUMMARY_SNIPPET_CHARS: usize = 50;

/// Heuristic paragraph type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParagraphKind {
    /// Ends with a colon, e.g. "Date of Loss:"
    Label,
    /// All upper case, or names a report section
    Header,
    /// Wrapped in parentheses, e.g. "(one story, two story, etc.)"
    Instruction,
    /// Anything else
    Content,
}

impl ParagraphKind {
    /// Upper-case tag used in summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphKind::Label => "LABEL",
            ParagraphKind::Header => "HEADER",
            ParagraphKind::Instruction => "INSTRUCTION",
            ParagraphKind::Content => "CONTENT",
        }
    }
}

impl std::fmt::Display for ParagraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One non-blank template paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphDescriptor {
    /// Position in the full body paragraph list, blank paragraphs included
    pub index: usize,

    /// Heuristic type
    #[serde(rename = "type")]
    pub kind: ParagraphKind,

    /// Paragraph style display name
    pub style: String,

    /// Trimmed text, first 100 characters
    pub text: String,
}

/// Classify a paragraph's text.
///
/// Rules apply in order: trailing colon, then upper case or header keyword,
/// then parentheses, else content.
pub fn classify(text: &str) -> ParagraphKind {
    let text = text.trim();
    if text.ends_with(':') {
        ParagraphKind::Label
    } else if is_upper(text) || HEADER_KEYWORDS.iter().any(|k| text.contains(k)) {
        ParagraphKind::Header
    } else if text.starts_with('(') && text.ends_with(')') {
        ParagraphKind::Instruction
    } else {
        ParagraphKind::Content
    }
}

/// At least one cased character and no lower-case ones.
fn is_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Describe every non-blank body paragraph, in document order.
pub fn analyze_structure(doc: &TemplateDocument) -> Vec<ParagraphDescriptor> {
    let descriptors: Vec<ParagraphDescriptor> = doc
        .paragraphs()
        .enumerate()
        .filter_map(|(index, paragraph)| {
            let full = paragraph.plain_text();
            let text = full.trim();
            if text.is_empty() {
                return None;
            }
            Some(ParagraphDescriptor {
                index,
                kind: classify(text),
                style: doc.style_name(paragraph).to_string(),
                text: truncate_chars(text, SNIPPET_CHARS).to_string(),
            })
        })
        .collect();

    log::debug!(
        "Analyzed {} of {} paragraphs",
        descriptors.len(),
        doc.paragraph_count()
    );
    descriptors
}

/// Numbered summary of the first 30 descriptors, one per line:
/// `Line {index}: [{TYPE}] {snippet}...`.
pub fn structure_summary(descriptors: &[ParagraphDescriptor]) -> String {
    descriptors
        .iter()
        .take(SUMMARY_DESCRIPTORS)
        .map(|d| {
            format!(
                "Line {}: [{}] {}...",
                d.index,
                d.kind,
                truncate_chars(&d.text, SUMMARY_SNIPPET_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
