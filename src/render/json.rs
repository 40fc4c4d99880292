//! JSON rendering of template structure.

use crate::analyze::ParagraphDescriptor;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert structure descriptors to JSON.
pub fn to_json(descriptors: &[ParagraphDescriptor], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(descriptors),
        JsonFormat::Compact => serde_json::to_string(descriptors),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
