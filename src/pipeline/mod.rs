//! Report generation pipeline.
//!
//! One run is strictly sequential: load the template, analyze it, extract
//! the photo reports, ask the completion service to study the template,
//! ask it to fill the template, then populate and serialize the result.
//! There are no retries. A failed structure-analysis call leaves the
//! analysis empty and the run continues; a failed or empty fill answer ends
//! the run with [`Error::EmptyCompletion`] and no document.
//!
//! # Example
//!
//! ```no_run
//! use glrfill::completion::{CompletionConfig, CredentialSource};
//! use glrfill::pipeline::{ReportPipeline, Upload};
//!
//! fn main() -> glrfill::Result<()> {
//!     let pipeline =
//!         ReportPipeline::from_credentials(&CredentialSource::default(), CompletionConfig::default())?;
//!     let template = Upload::from_path("glr_template.docx")?;
//!     let reports = vec![Upload::from_path("photo_report.pdf")?];
//!
//!     let output = pipeline.run(&template, &reports)?;
//!     std::fs::write(&output.file_name, &output.document)?;
//!     Ok(())
//! }
//! ```

mod observer;
pub mod prompts;

pub use observer::{LogObserver, PipelineObserver, Stage};

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::analyze::{analyze_structure, structure_summary};
use crate::completion::{ChatCompletionClient, CompletionConfig, CompletionService, CredentialSource};
use crate::detect::{is_docx_bytes, is_pdf_bytes};
use crate::error::{Error, Result};
use crate::parser::{try_extract_text, DocxParser};
use crate::populate::{populate_template, PopulateReport};
use crate::render::{self, DOCX_MIME_TYPE, OUTPUT_FILE_NAME};

use prompts::{combine_reports, excerpt, fill_prompt, structure_prompt};

/// Characters of template text embedded in the structure prompt.
pub const STRUCTURE_EXCERPT_CHARS: usize = 4000;

/// Characters of combined report text embedded in the fill prompt.
pub const REPORT_EXCERPT_CHARS: usize = 12000;

/// Characters of generated text shown in a preview.
pub const PREVIEW_CHARS: usize = 2000;

/// An uploaded input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name shown in report headers
    pub name: String,
    /// File content
    pub data: Vec<u8>,
}

impl Upload {
    /// Create an upload from in-memory content.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Read an upload from disk, named after the file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, data })
    }
}

/// Tunables for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Template characters in the structure prompt
    pub structure_excerpt_chars: usize,

    /// Report characters in the fill prompt
    pub report_excerpt_chars: usize,

    /// File name offered for the output
    pub output_file_name: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            structure_excerpt_chars: STRUCTURE_EXCERPT_CHARS,
            report_excerpt_chars: REPORT_EXCERPT_CHARS,
            output_file_name: OUTPUT_FILE_NAME.to_string(),
        }
    }
}

impl PipelineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the structure prompt's template excerpt length.
    pub fn with_structure_excerpt(mut self, chars: usize) -> Self {
        self.structure_excerpt_chars = chars;
        self
    }

    /// Set the fill prompt's report excerpt length.
    pub fn with_report_excerpt(mut self, chars: usize) -> Self {
        self.report_excerpt_chars = chars;
        self
    }

    /// Set the output file name.
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }
}

/// The populated report, ready for download.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Serialized DOCX
    pub document: Vec<u8>,
    /// Suggested file name
    pub file_name: String,
    /// MIME type of `document`
    pub mime_type: &'static str,
    /// Text returned by the fill call
    pub generated_text: String,
    /// Text returned by the structure call (empty if it failed)
    pub structure_analysis: String,
    /// How generated lines mapped onto the template
    pub populate: PopulateReport,
}

impl PipelineOutput {
    /// The generated text, cut at `max_chars` with a trailing ellipsis.
    pub fn preview(&self, max_chars: usize) -> String {
        let shown = excerpt(&self.generated_text, max_chars);
        if shown.len() < self.generated_text.len() {
            format!("{}...", shown)
        } else {
            shown.to_string()
        }
    }
}

/// The report generation orchestrator.
pub struct ReportPipeline<S> {
    service: S,
    options: PipelineOptions,
    observer: Box<dyn PipelineObserver>,
}

impl ReportPipeline<ChatCompletionClient> {
    /// Resolve the credential once and build a pipeline around the HTTP
    /// client.
    ///
    /// Fails with [`Error::MissingCredential`] before any network call when
    /// no key is available.
    pub fn from_credentials(source: &CredentialSource, config: CompletionConfig) -> Result<Self> {
        Ok(Self::new(ChatCompletionClient::from_source(source, config)?))
    }
}

impl<S: CompletionService> ReportPipeline<S> {
    /// Create a pipeline around a completion service.
    pub fn new(service: S) -> Self {
        Self {
            service,
            options: PipelineOptions::default(),
            observer: Box::new(LogObserver),
        }
    }

    /// Set run options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the progress observer.
    pub fn with_observer(mut self, observer: Box<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The completion service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run the whole pipeline for one template and its photo reports.
    pub fn run(&self, template: &Upload, reports: &[Upload]) -> Result<PipelineOutput> {
        if reports.is_empty() {
            return Err(Error::Other(
                "at least one photo report is required".to_string(),
            ));
        }

        self.observer.on_stage(&Stage::LoadingTemplate);
        if !is_docx_bytes(&template.data) {
            return Err(Error::InvalidTemplate(format!(
                "{} is not a DOCX document",
                template.name
            )));
        }
        let mut template_file = temp_docx()?;
        template_file.write_all(&template.data)?;
        template_file.flush()?;
        let doc = DocxParser::open(template_file.path())?.parse()?;

        self.observer.on_stage(&Stage::AnalyzingStructure);
        let template_text = render::to_text(&doc);
        let descriptors = analyze_structure(&doc);
        let summary = structure_summary(&descriptors);

        self.observer.on_stage(&Stage::ExtractingReports {
            count: reports.len(),
        });
        let texts: Vec<String> = reports.iter().map(|r| self.extract_report(r)).collect();
        let combined = combine_reports(
            reports
                .iter()
                .zip(&texts)
                .map(|(r, t)| (r.name.as_str(), t.as_str())),
        );

        self.observer.on_stage(&Stage::LearningStructure);
        let prompt = structure_prompt(
            &summary,
            excerpt(&template_text, self.options.structure_excerpt_chars),
        );
        let structure_analysis = self.request(&prompt).unwrap_or_default();

        self.observer.on_stage(&Stage::GeneratingReport);
        let prompt = fill_prompt(
            &structure_analysis,
            &template_text,
            excerpt(&combined, self.options.report_excerpt_chars),
        );
        let generated_text = match self.request(&prompt) {
            Some(text) if !text.is_empty() => text,
            _ => return Err(Error::EmptyCompletion),
        };

        self.observer.on_stage(&Stage::CreatingDocument);
        let populated = populate_template(template_file.path(), &generated_text)?;
        if !populated.report.is_aligned() {
            self.observer.on_warning(&format!(
                "Generated text did not line up with the template: {} replaced, {} appended, {} left unchanged",
                populated.report.replaced, populated.report.appended, populated.report.untouched
            ));
        }

        let output_file = temp_docx()?;
        render::save(&populated.document, output_file.path())?;
        let document = fs::read(output_file.path())?;

        template_file.close()?;
        output_file.close()?;

        self.observer.on_stage(&Stage::Complete);
        Ok(PipelineOutput {
            document,
            file_name: self.options.output_file_name.clone(),
            mime_type: DOCX_MIME_TYPE,
            generated_text,
            structure_analysis,
            populate: populated.report,
        })
    }

    /// Extract one report's text, degrading to empty text on failure.
    fn extract_report(&self, report: &Upload) -> String {
        if !is_pdf_bytes(&report.data) {
            self.observer
                .on_warning(&format!("{} does not look like a PDF", report.name));
        }
        match try_extract_text(&report.data) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Error extracting PDF {}: {}", report.name, e);
                self.observer
                    .on_warning(&format!("Error extracting PDF {}: {}", report.name, e));
                String::new()
            }
        }
    }

    /// Call the completion service, turning any failure into `None`.
    fn request(&self, prompt: &str) -> Option<String> {
        match self.service.complete(prompt) {
            Ok(text) => Some(text),
            Err(e) => {
                log::error!("LLM API Error: {}", e);
                self.observer.on_warning(&format!("LLM API Error: {}", e));
                None
            }
        }
    }
}

fn temp_docx() -> Result<NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix("glrfill-")
        .suffix(".docx")
        .tempfile()?)
}
