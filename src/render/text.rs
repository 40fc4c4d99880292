//! Plain text rendering of a template.

use crate::model::TemplateDocument;

/// Separator between non-blank cells of a table row.
pub const CELL_SEPARATOR: &str = " | ";

/// Full readable text of a template.
///
/// Non-blank body paragraphs come first, in document order and untrimmed,
/// followed by one line per table row that has at least one non-blank cell.
pub fn to_text(doc: &TemplateDocument) -> String {
    let mut lines: Vec<String> = doc
        .paragraphs()
        .map(|p| p.plain_text())
        .filter(|t| !t.trim().is_empty())
        .collect();

    for table in doc.tables() {
        lines.extend(table.rows.iter().filter_map(|row| row.joined_text()));
    }

    lines.join("\n")
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
