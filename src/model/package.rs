//! Parts of the DOCX zip container.

/// Default location of the main document part.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// One entry of the zip container, carried through unchanged on save.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagePart {
    /// Entry name inside the zip (e.g., "word/styles.xml")
    pub name: String,

    /// Raw entry data
    pub data: Vec<u8>,

    /// Whether the entry was stored compressed
    pub compressed: bool,

    /// Whether the entry is a directory marker
    pub is_dir: bool,
}

impl PackagePart {
    /// Create a compressed file part.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            compressed: true,
            is_dir: false,
        }
    }
}

/// The entries of a DOCX container, in archive order.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// All parts, including the main document part
    pub parts: Vec<PackagePart>,

    /// Name of the main document part
    pub main_part: String,
}

impl Package {
    /// Create an empty package whose main part is `word/document.xml`.
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            main_part: MAIN_DOCUMENT_PART.to_string(),
        }
    }

    /// Get a part by name.
    pub fn get(&self, name: &str) -> Option<&PackagePart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Check whether a part exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Directory of the main part, with trailing slash (e.g., "word/").
    pub fn main_part_dir(&self) -> &str {
        match self.main_part.rfind('/') {
            Some(pos) => &self.main_part[..=pos],
            None => "",
        }
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}
