//! Error types for the page generation pipeline.
//!
//! - [`CsvError`] - Reading and decoding the event sheet
//! - [`ValidationError`] - Serialized events violate the page contract
//! - [`RenderError`] - Building the HTML document
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Per-field problems (a bad date, a bad coordinate) are not errors: the
//! row transformer degrades them to absent values. Everything here aborts
//! the run before any output is written.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading the event sheet.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input file does not exist.
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file exists but could not be read.
    #[error("Cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content as {0}")]
    EncodingError(String),

    /// Malformed CSV record.
    #[error("Invalid CSV at line {line}: {message}")]
    ParseError { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row is missing or blank.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl CsvError {
    /// Map an IO error on `path` to the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Read { path, source }
        }
    }
}

impl From<csv::Error> for CsvError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        Self::ParseError {
            line,
            message: e.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Serialized events do not match the schema the page template expects.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema validation failed.
    #[error("Event payload failed validation: {}", .errors.join("; "))]
    SchemaError { errors: Vec<String> },

    /// The embedded schema itself is unusable.
    #[error("Invalid event schema: {0}")]
    InvalidSchema(String),
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors while producing the HTML document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Template placeholder left without a value.
    #[error("Unfilled template placeholder: {0}")]
    UnfilledPlaceholder(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::generate_page`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Output could not be written.
    #[error("Cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
