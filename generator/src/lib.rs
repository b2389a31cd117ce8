//! # eventmap - offline event listing to a static calendar/map page
//!
//! Reads a spreadsheet export of events and writes one self-contained HTML
//! page with a card list, a month calendar and a map.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│  index.html │
//! │ (UTF8/EUCKR)│     │  (auto-enc) │     │ (rows→Event)│     │ (JSON+page) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chrono::Local;
//! use eventmap::{generate_page, GenerateOptions};
//! use std::path::Path;
//!
//! let mut options = GenerateOptions::new(Local::now().date_naive());
//! options.transform.hide_past = true;
//! generate_page(Path::new("events.csv"), Path::new("index.html"), &options)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Event, MapTarget, Coordinate)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Row transformer and pipeline
//! - [`validation`] - Event payload schema check
//! - [`render`] - HTML page serializer
//! - [`logs`] - Progress logging over `tracing`

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Output
pub mod render;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CsvError, PipelineError, RenderError, ValidationError};

pub use models::{Coordinate, Event, MapTarget, MAP_SLOTS};

pub use parser::{
    csv_to_json, decode_content, detect_delimiter, detect_encoding, parse_bytes_auto,
    parse_csv_file_auto, ParseResult,
};

pub use transform::{
    build_events, format_delimiter, generate_page, render_events, transform_row, transform_rows,
    BuiltEvents, Columns, CsvInfo, ExpiredRow, GenerateOptions, PipelineSummary, RowOutcome,
    TransformOptions, TransformResult,
};

pub use validation::{is_valid_events, validate_events};

pub use render::{embed_json, escape_html, render_page, PageConfig};
