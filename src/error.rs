//! Error types for the lab notebook
//!
//! A missing or malformed experiment log is not an error: the store
//! recovers it to an empty log. Everything that can actually fail a run
//! (writing the log, rendering a report) surfaces here.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Lab notebook error types
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (reading prompts, writing the log or a report file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Experiment log could not be serialized
    #[error("Experiment log serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// PDF rendering failed inside the PDF library
    #[error("PDF report rendering failed: {0}")]
    PdfRender(String),

    /// Word document rendering failed inside the DOCX library
    #[error("Word report rendering failed: {0}")]
    DocxRender(String),
}
