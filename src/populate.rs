//! Template population.
//!
//! Generated text is mapped onto the template by position: the i-th
//! non-blank generated line replaces the text of the i-th non-blank body
//! paragraph. Each rewritten paragraph keeps its first run's formatting.
//! Alignment is purely ordinal; nothing checks that a line fits the kind
//! of paragraph it lands in.

use std::path::Path;

use crate::error::Result;
use crate::model::{Paragraph, TemplateDocument, TextRun};
use crate::parser::DocxParser;

/// What a population pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopulateReport {
    /// Template paragraphs whose text was replaced
    pub replaced: usize,
    /// Generated lines appended as new paragraphs
    pub appended: usize,
    /// Non-blank template paragraphs left with their original text
    pub untouched: usize,
}

impl PopulateReport {
    /// Whether generated line count and template paragraph count matched.
    pub fn is_aligned(&self) -> bool {
        self.appended == 0 && self.untouched == 0
    }
}

/// Result of populating a template loaded from disk.
#[derive(Debug, Clone)]
pub struct PopulatedTemplate {
    /// The populated document, ready for serialization
    pub document: TemplateDocument,
    /// Counts from the population pass
    pub report: PopulateReport,
}

/// Trimmed non-blank lines of generated text, in order.
pub fn generated_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Rewrite a paragraph's text, keeping its first run's formatting.
///
/// Every run's text is cleared; the replacement goes into the first run.
/// Later runs stay in place with no text. A paragraph without runs gets a
/// new unformatted run.
pub fn rewrite_paragraph(paragraph: &Paragraph, text: &str) -> Paragraph {
    let mut rewritten = paragraph.clone();

    for run in rewritten.runs_mut() {
        run.set_text("");
    }

    let first = rewritten.runs_mut().next();
    match first {
        Some(first) => first.set_text(text),
        None => rewritten.add_run(TextRun::new(text)),
    }

    rewritten
}

/// Populate a document in place with generated text.
pub fn populate_document(doc: &mut TemplateDocument, generated_text: &str) -> PopulateReport {
    let generated = generated_lines(generated_text);
    let mut report = PopulateReport::default();

    {
        let mut targets = doc.paragraphs_mut().filter(|p| !p.is_blank());
        let mut lines = generated.iter();
        loop {
            match (targets.next(), lines.next()) {
                (Some(target), Some(line)) => {
                    *target = rewrite_paragraph(target, line);
                    report.replaced += 1;
                }
                (Some(_), None) => report.untouched += 1,
                (None, _) => break,
            }
        }
    }

    for line in &generated[report.replaced..] {
        doc.add_paragraph(line);
        report.appended += 1;
    }

    if report.is_aligned() {
        log::debug!("Populated {} paragraphs", report.replaced);
    } else {
        log::warn!(
            "Generated text has {} lines for {} template paragraphs ({} appended, {} left unchanged)",
            generated.len(),
            report.replaced + report.untouched,
            report.appended,
            report.untouched
        );
    }

    report
}

/// Reload a template from `path` and populate it with generated text.
pub fn populate_template<P: AsRef<Path>>(path: P, generated_text: &str) -> Result<PopulatedTemplate> {
    let mut document = DocxParser::open(path)?.parse()?;
    let report = populate_document(&mut document, generated_text);
    Ok(PopulatedTemplate { document, report })
}
