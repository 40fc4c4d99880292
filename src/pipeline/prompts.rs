//! Prompt construction for the two completion calls.

use crate::render::truncate_chars;

/// Header line preceding each report's text in the combined block.
pub fn report_header(number: usize, name: &str) -> String {
    format!("=== REPORT {}: {} ===", number, name)
}

/// Concatenate extracted report texts, numbering reports from 1.
///
/// Each report contributes `"\n\n=== REPORT {n}: {name} ===\n{text}"`, so a
/// report that yielded no text still shows up with its header.
pub fn combine_reports<'a, I>(reports: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut combined = String::new();
    for (i, (name, text)) in reports.into_iter().enumerate() {
        combined.push_str("\n\n");
        combined.push_str(&report_header(i + 1, name));
        combined.push('\n');
        combined.push_str(text);
    }
    combined
}

/// Prompt asking the model to study the template before filling it.
pub fn structure_prompt(structure_summary: &str, template_excerpt: &str) -> String {
    format!(
        r#"You are analyzing an insurance GLR template structure.

TEMPLATE STRUCTURE:
{structure_summary}

FULL TEMPLATE CONTENT:
{template_excerpt}

Analyze this template and identify:
1. What sections exist (e.g., Date of Loss, Insurable Interest, Dwelling Description, etc.)
2. What information needs to be filled in each section
3. What instructional text (in parentheses) needs to be replaced
4. The order and hierarchy of sections

Respond with a brief analysis of the template structure."#
    )
}

/// Prompt asking the model to rewrite the whole report, one paragraph per
/// line, from the structure analysis, the full template and the report
/// excerpt.
pub fn fill_prompt(structure_analysis: &str, template_text: &str, report_excerpt: &str) -> String {
    format!(
        r#"You are an expert insurance claims adjuster. You must complete a General Loss Report (GLR) based on a template and photo inspection reports.

YOUR UNDERSTANDING OF THE TEMPLATE STRUCTURE:
{structure_analysis}

ORIGINAL TEMPLATE (with instructions to follow):
{template_text}

PHOTO INSPECTION REPORTS (your source data):
{report_excerpt}

YOUR TASK:
Rewrite the ENTIRE GLR report by:
1. Filling in ALL placeholders with actual data from the photo reports
2. DELETING all instructional text in parentheses like "(one story, two story, etc.)" and replacing with actual values
3. DELETING template instructions like "(Put N/A if...)" and "(Be sure to describe...)"
4. Writing detailed, professional descriptions of damage based on the photo reports
5. Including specific measurements, counts, and details from the reports
6. Using proper insurance report language and formatting

CRITICAL RULES:
- MAINTAIN THE EXACT SAME STRUCTURE as the template (same sections, same order)
- Each line should correspond to a paragraph in the template
- Extract the CORRECT date of loss from the reports (not the inspection date)
- Include full address with street, city, state, zip
- Be specific about damage: include counts, locations, measurements
- Delete ALL template instructions and parenthetical options
- Write complete sentences in professional insurance language
- For sections with no data (like Supplement, Priors), write "N/A" or appropriate professional response
- Match the style and detail level of professional insurance adjusters
- Keep section headers exactly as they are in the template

FORMATTING:
- Put each paragraph on a new line
- Maintain the same number of sections as the template
- Keep headers like "DwellingRoof", "Front Elevation", etc. exactly as in template

Return the COMPLETE filled report as plain text, one paragraph per line."#
    )
}

/// Truncate `text` for embedding in a prompt.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    truncate_chars(text, max_chars)
}
