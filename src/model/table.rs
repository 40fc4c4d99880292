//! Table types.
//!
//! Tables are read-only views: the decoded rows and cells are used for text
//! extraction, and the original `w:tbl` element is written back unchanged.

use super::Paragraph;
use crate::parser::xml::XmlElement;

/// A body table (`w:tbl`).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    element: XmlElement,
}

impl Table {
    /// Decode a `w:tbl` element.
    pub fn from_element(element: &XmlElement) -> Self {
        let mut rows: Vec<TableRow> = Vec::new();
        for tr in element.elements().filter(|e| e.is("w:tr")) {
            let row = TableRow::from_element(tr, rows.last());
            rows.push(row);
        }
        Self {
            rows,
            element: element.clone(),
        }
    }

    /// The original element, for writing.
    pub fn to_element(&self) -> XmlElement {
        self.element.clone()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// One cell per grid column
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Decode a `w:tr`, laying its cells out on the table grid.
    ///
    /// A cell spanning several grid columns appears once per column. A
    /// vertical merge continuation resolves to the cell in the same column
    /// of the row above.
    fn from_element(element: &XmlElement, above: Option<&TableRow>) -> Self {
        let mut cells: Vec<TableCell> = Vec::new();
        for tc in element.elements().filter(|e| e.is("w:tc")) {
            let continues = continues_vertical_merge(tc);
            let own = TableCell::from_element(tc);
            for _ in 0..grid_span(tc) {
                let cell = match above.and_then(|row| row.cells.get(cells.len())) {
                    Some(upper) if continues => upper.clone(),
                    _ => own.clone(),
                };
                cells.push(cell);
            }
        }
        Self { cells }
    }

    /// Row text: non-blank cell texts joined by `" | "`, or `None` when
    /// every cell is blank.
    pub fn joined_text(&self) -> Option<String> {
        let cells: Vec<String> = self
            .cells
            .iter()
            .map(TableCell::plain_text)
            .filter(|t| !t.trim().is_empty())
            .collect();

        if cells.is_empty() {
            None
        } else {
            Some(cells.join(" | "))
        }
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Paragraphs directly inside the cell
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    fn from_element(element: &XmlElement) -> Self {
        let paragraphs = element
            .elements()
            .filter(|e| e.is("w:p"))
            .map(Paragraph::from_element)
            .collect();
        Self { paragraphs }
    }

    /// Cell text: paragraph texts joined by newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Number of grid columns a `w:tc` covers.
fn grid_span(tc: &XmlElement) -> usize {
    tc.child("w:tcPr")
        .and_then(|p| p.child("w:gridSpan"))
        .and_then(|s| s.attribute("w:val"))
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Whether a `w:tc` continues a vertical merge (`w:vMerge` without a value
/// or with `continue`).
fn continues_vertical_merge(tc: &XmlElement) -> bool {
    tc.child("w:tcPr")
        .and_then(|p| p.child("w:vMerge"))
        .is_some_and(|m| matches!(m.attribute("w:val"), None | Some("continue")))
}
