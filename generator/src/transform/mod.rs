//! Transformation module.
//!
//! This module turns sheet rows into page-ready events:
//! - Columns: header names and the map-slot naming convention
//! - Fields: total per-cell parsers (dates, coordinates, locations)
//! - Rows: the row transformer and recency filter
//! - Pipeline: file in, page out

pub mod columns;
pub mod fields;
pub mod pipeline;
pub mod rows;

pub use columns::Columns;
pub use pipeline::*;
pub use rows::*;
