//! Integration tests for template population.

mod common;

use common::{blank, bold_para, docx, glr_template, para, temp_docx};
use glrfill::model::RunContent;
use glrfill::parser::xml::XmlElement;
use glrfill::render::to_docx_bytes;
use glrfill::{open_template_bytes, populate_template, PopulateReport, TemplateDocument};

fn texts(doc: &TemplateDocument) -> Vec<String> {
    doc.paragraphs().map(|p| p.plain_text()).collect()
}

fn first_run_properties(doc: &TemplateDocument, index: usize) -> Option<XmlElement> {
    doc.paragraphs()
        .nth(index)
        .and_then(|p| p.runs().next())
        .and_then(|r| r.properties.clone())
}

/// Populate from a temp file, serialize, and read the result back.
fn populate_roundtrip(template: &[u8], generated: &str) -> (TemplateDocument, PopulateReport) {
    let file = temp_docx(template);
    let populated = populate_template(file.path(), generated).unwrap();
    let bytes = to_docx_bytes(&populated.document).unwrap();
    (open_template_bytes(&bytes).unwrap(), populated.report)
}

#[test]
fn test_date_of_loss_scenario() {
    let italic_instruction = r#"<w:p><w:r><w:rPr><w:i/><w:color w:val="808080"/></w:rPr><w:t>(enter date)</w:t></w:r></w:p>"#;
    let template = docx(&[
        bold_para("Date of Loss:"),
        italic_instruction.to_string(),
        para("John Smith, 123 Main St"),
    ]
    .concat());
    let original = open_template_bytes(&template).unwrap();

    let (doc, report) = populate_roundtrip(
        &template,
        "Date of Loss:\n01/15/2024\nJohn Smith, 123 Main St, Springfield, IL",
    );

    assert_eq!(
        texts(&doc),
        vec![
            "Date of Loss:",
            "01/15/2024",
            "John Smith, 123 Main St, Springfield, IL"
        ]
    );
    assert!(report.is_aligned());
    assert_eq!(report.replaced, 3);

    // Each paragraph keeps its first run's formatting
    for i in 0..3 {
        assert_eq!(first_run_properties(&doc, i), first_run_properties(&original, i));
    }
    let italic = first_run_properties(&doc, 1).unwrap();
    assert!(italic.child("w:i").is_some());
}

#[test]
fn test_surplus_lines_are_appended() {
    let template = glr_template();
    let original = open_template_bytes(&template).unwrap();
    assert_eq!(original.paragraph_count(), 10);

    let generated: Vec<String> = (1..=11).map(|i| format!("Line {}", i)).collect();
    let (doc, report) = populate_roundtrip(&template, &generated.join("\n"));

    // 10 paragraphs, 8 of them non-blank, 11 generated lines
    assert_eq!(doc.paragraph_count(), 10 + (11 - 8));
    assert_eq!(
        report,
        PopulateReport {
            replaced: 8,
            appended: 3,
            untouched: 0
        }
    );

    let all = texts(&doc);
    assert_eq!(&all[10..], &["Line 9", "Line 10", "Line 11"]);

    // Appended paragraphs carry no formatting
    let appended = doc.paragraphs().last().unwrap();
    assert!(appended.properties.is_none());
    assert!(appended.runs().all(|r| r.properties.is_none()));
}

#[test]
fn test_appended_paragraphs_precede_section_properties() {
    let file = temp_docx(&glr_template());
    let populated = populate_template(file.path(), &"x\n".repeat(12)).unwrap();

    let root = populated.document.to_root();
    let body = root.child("w:body").unwrap();
    let last = body.elements().last().unwrap();
    assert_eq!(last.name, "w:sectPr");
}

#[test]
fn test_missing_lines_leave_paragraphs_untouched() {
    let (doc, report) = populate_roundtrip(&glr_template(), "GLR\n\n  03/02/2024  \n");

    assert_eq!(report.replaced, 2);
    assert_eq!(report.untouched, 6);
    assert_eq!(report.appended, 0);

    let all = texts(&doc);
    assert_eq!(all[0], "GLR");
    assert_eq!(all[2], "03/02/2024");
    assert_eq!(all[3], "(enter date)");
    assert_eq!(all[9], "Describe the roof damage here.");
}

#[test]
fn test_alignment_is_positional() {
    // Lines land by position even when they obviously belong elsewhere
    let template = docx(&[para("Date of Loss:"), blank(), para("Insured:")].concat());
    let (doc, _) = populate_roundtrip(&template, "Jane Doe\n01/15/2024");

    assert_eq!(texts(&doc), vec!["Jane Doe", "", "01/15/2024"]);
}

#[test]
fn test_blank_paragraphs_and_tables_untouched() {
    let template = glr_template();
    let original = open_template_bytes(&template).unwrap();
    let generated = "A\nB\nC\nD\nE\nF\nG\nH";

    let (doc, _) = populate_roundtrip(&template, generated);

    let all = texts(&doc);
    assert_eq!(all[1], "");
    assert_eq!(all[5], "");
    assert_eq!(
        doc.tables().collect::<Vec<_>>(),
        original.tables().collect::<Vec<_>>()
    );
}

#[test]
fn test_styles_survive_population() {
    let (doc, _) = populate_roundtrip(&glr_template(), "A\nB\nC\nD\nE\nF\nG\nH");
    let paragraphs: Vec<_> = doc.paragraphs().collect();

    assert_eq!(doc.style_name(paragraphs[0]), "Title");
    assert_eq!(doc.style_name(paragraphs[6]), "Heading 1");
    assert_eq!(paragraphs[6].plain_text(), "E");
}

#[test]
fn test_multi_run_paragraph_keeps_empty_trailing_runs() {
    let template = docx(
        r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Roof: </w:t></w:r><w:r><w:t>(count)</w:t></w:r></w:p>"#,
    );
    let (doc, _) = populate_roundtrip(&template, "Roof: 12 damaged shingles");

    let paragraph = doc.paragraphs().next().unwrap();
    assert_eq!(paragraph.plain_text(), "Roof: 12 damaged shingles");
    assert_eq!(paragraph.run_count(), 2);
    let runs: Vec<_> = paragraph.runs().collect();
    assert!(runs[0].properties.is_some());
    assert_eq!(runs[1].text(), "");
}

#[test]
fn test_tabs_in_generated_text_become_tab_elements() {
    let template = docx(&para("Item"));
    let file = temp_docx(&template);
    let populated = populate_template(file.path(), "Shingles\t12").unwrap();

    let run = populated.document.paragraphs().next().unwrap().runs().next().unwrap().clone();
    assert_eq!(
        run.content,
        vec![
            RunContent::Text("Shingles".to_string()),
            RunContent::Tab,
            RunContent::Text("12".to_string())
        ]
    );
    assert_eq!(run.text(), "Shingles\t12");
}

#[test]
fn test_populate_missing_template_fails() {
    assert!(populate_template("/nonexistent/template.docx", "text").is_err());
}
