//! High-level pipeline: CSV file → HTML page.
//!
//! Combines all steps: parsing, row transformation, validation, rendering
//! and the final write. Output is all-or-nothing: the page is rendered in
//! memory and persisted through a temporary file in the target directory,
//! so a failed run never leaves a partial document behind.
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Local;
//! use eventmap::{generate_page, GenerateOptions};
//! use std::path::Path;
//!
//! let options = GenerateOptions::new(Local::now().date_naive());
//! let summary = generate_page(Path::new("events.csv"), Path::new("index.html"), &options)?;
//! println!("{} events", summary.event_count);
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::rows::{transform_rows, TransformOptions, TransformResult};
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::Event;
use crate::parser::{parse_csv_file_auto, ParseResult};
use crate::render::{render_page, PageConfig};
use crate::validation::validate_events;

/// Options for the whole pipeline
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Row transformer settings.
    pub transform: TransformOptions,
    /// Page presentation settings.
    pub page: PageConfig,
    /// CSV delimiter (auto-detect if `None`).
    pub delimiter: Option<char>,
    /// Skip the schema check of the event payload.
    pub skip_validation: bool,
}

impl GenerateOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            transform: TransformOptions::new(today),
            page: PageConfig::default(),
            delimiter: None,
            skip_validation: false,
        }
    }
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl From<&ParseResult> for CsvInfo {
    fn from(parsed: &ParseResult) -> Self {
        Self {
            encoding: parsed.encoding.clone(),
            delimiter: parsed.delimiter,
            headers: parsed.headers.clone(),
            row_count: parsed.records.len(),
        }
    }
}

/// Events built from a sheet, with parsing metadata.
#[derive(Debug, Clone)]
pub struct BuiltEvents {
    pub csv_info: CsvInfo,
    pub result: TransformResult,
}

/// Result of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub csv_info: CsvInfo,
    /// Events embedded in the page.
    pub event_count: usize,
    /// Rows dropped by the recency filter.
    pub expired_count: usize,
    /// Events with at least one map pin.
    pub mapped_count: usize,
    pub output: PathBuf,
    pub bytes_written: usize,
}

/// Parse a CSV file and transform its rows.
pub fn build_events(input: &Path, options: &GenerateOptions) -> PipelineResult<BuiltEvents> {
    log_info(format!("📖 Reading {}", input.display()));
    let parsed = parse_csv_file_auto(input, options.delimiter)?;
    let csv_info = CsvInfo::from(&parsed);

    log_success(format!("Detected encoding: {}", csv_info.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(csv_info.delimiter)));
    log_success(format!("Read {} rows", csv_info.row_count));
    tracing::debug!(headers = ?csv_info.headers, "columns");
    warn_missing_columns(&csv_info.headers, options);

    let transform = &options.transform;
    if transform.hide_past {
        log_info(format!("Hiding events that ended before {}", transform.today));
    }

    let result = transform_rows(&parsed.records, transform);
    log_success(result.summary());
    for expired in &result.expired {
        tracing::debug!(row = expired.row, title = %expired.title, end = %expired.end, "expired");
    }

    Ok(BuiltEvents { csv_info, result })
}

/// Validate and render events into a complete HTML document.
pub fn render_events(events: &[Event], options: &GenerateOptions) -> PipelineResult<String> {
    if options.skip_validation {
        log_info("(validation skipped)");
    } else {
        let payload = serde_json::to_value(events).map_err(crate::error::RenderError::from)?;
        validate_events(&payload)?;
        log_success(format!("All {} events match the page schema", events.len()));
    }

    Ok(render_page(events, &options.page)?)
}

/// Run the full pipeline: read `input`, write the page to `output`.
///
/// Nothing is written unless every step succeeds.
pub fn generate_page(
    input: &Path,
    output: &Path,
    options: &GenerateOptions,
) -> PipelineResult<PipelineSummary> {
    let BuiltEvents { csv_info, result } = build_events(input, options)?;
    let events = result.events;

    let html = render_events(&events, options)?;
    write_atomically(output, &html)?;
    log_success(format!("💾 Page written to {}", output.display()));

    Ok(PipelineSummary {
        csv_info,
        event_count: events.len(),
        expired_count: result.expired.len(),
        mapped_count: events.iter().filter(|e| e.has_coordinates()).count(),
        output: output.to_path_buf(),
        bytes_written: html.len(),
    })
}

/// Write through a temp file in the same directory, then rename over `path`.
fn write_atomically(path: &Path, contents: &str) -> PipelineResult<()> {
    let write_err = |source: std::io::Error| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

fn warn_missing_columns(headers: &[String], options: &GenerateOptions) {
    let columns = &options.transform.columns;
    let required = [&columns.title, &columns.start, &columns.end];

    let missing: Vec<&str> = required
        .iter()
        .filter(|name| !headers.iter().any(|h| h == **name))
        .map(|name| name.as_str())
        .collect();

    if !missing.is_empty() {
        log_warning(format!("Missing columns (read as empty): {}", missing.join(", ")));
    }
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
