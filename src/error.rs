//! Error types for glrfill.

use std::io;
use thiserror::Error;

/// Result type alias for glrfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while filling a report template.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a DOCX package nor a PDF.
    #[error("Unknown file format: expected DOCX or PDF")]
    UnknownFormat,

    /// The DOCX zip container could not be read or written.
    #[error("DOCX package error: {0}")]
    Zip(String),

    /// The WordprocessingML part could not be parsed or written.
    #[error("XML error: {0}")]
    Xml(String),

    /// The template is not a usable DOCX document.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Text could not be extracted from a PDF report.
    #[error("PDF extraction error: {0}")]
    PdfExtract(String),

    /// Transport-level failure talking to the completion service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The completion service answered with a non-success status.
    #[error("Completion service returned {status}: {body}")]
    CompletionStatus {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The completion response body was not in the expected shape.
    #[error("Malformed completion response: {0}")]
    CompletionResponse(String),

    /// The fill step produced no text, so no document is written.
    #[error("Failed to generate report: the completion service returned no text")]
    EmptyCompletion,

    /// No API credential is available.
    #[error("Missing API credential: {0}")]
    MissingCredential(String),

    /// Error while serializing output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::PdfExtract(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::CompletionResponse(err.to_string())
        } else {
            Error::Http(err.to_string())
        }
    }
}
