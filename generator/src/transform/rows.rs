//! Row transformer: sheet rows to [`Event`]s.
//!
//! ```text
//! row ──▶ trim dates ──▶ end date? ──▶ recency filter ──▶ map targets ──▶ Event { id }
//!                          │                 │
//!                          └─ raw fallback   └─ expired rows dropped, no id consumed
//! ```
//!
//! The reference date is an explicit option so runs are reproducible; the
//! binary captures it once before transforming.

use chrono::NaiveDate;
use serde_json::Value;

use super::columns::Columns;
use super::fields::{
    display_end, field, location_name, non_empty, parse_coordinate, parse_date, split_location,
};
use crate::models::{Event, MapTarget, MAP_SLOTS};

/// Default placeholder for targets of an event without location text.
pub const DEFAULT_PLACEHOLDER: &str = "Location {n}";

/// Options for the row transformer.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Drop events whose end date is before `today`.
    pub hide_past: bool,
    /// Reference date for the recency filter.
    pub today: NaiveDate,
    /// Placeholder target name; `{n}` becomes the 1-based slot number.
    pub placeholder: String,
    /// Sheet header names.
    pub columns: Columns,
}

impl TransformOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            hide_past: false,
            today,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            columns: Columns::default(),
        }
    }

    pub fn with_hide_past(mut self, hide_past: bool) -> Self {
        self.hide_past = hide_past;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// Result of transforming a sheet
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    /// Emitted events, ids dense from 0.
    pub events: Vec<Event>,
    /// Rows removed by the recency filter.
    pub expired: Vec<ExpiredRow>,
}

/// A row dropped because its event already ended.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiredRow {
    /// 0-based index among input records.
    pub row: usize,
    pub title: String,
    pub end: NaiveDate,
}

impl TransformResult {
    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Transformed: {} events, {} expired",
            self.events.len(),
            self.expired.len()
        )
    }
}

/// What happened to a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Emit(Event),
    Expired(NaiveDate),
}

/// Transform all rows in input order.
pub fn transform_rows(records: &[Value], options: &TransformOptions) -> TransformResult {
    let mut result = TransformResult::default();

    for (row_idx, row) in records.iter().enumerate() {
        match transform_row(row, result.events.len(), options) {
            RowOutcome::Emit(event) => result.events.push(event),
            RowOutcome::Expired(end) => result.expired.push(ExpiredRow {
                row: row_idx,
                title: field(row, &options.columns.title).to_string(),
                end,
            }),
        }
    }

    result
}

/// Transform one row, giving it `id` if it is emitted.
pub fn transform_row(row: &Value, id: usize, options: &TransformOptions) -> RowOutcome {
    let columns = &options.columns;

    let start = field(row, &columns.start).trim().to_string();
    let end = field(row, &columns.end).trim().to_string();

    // Unparseable end dates are never filtered.
    let end_date = parse_date(&end);
    if let Some(date) = end_date {
        if options.hide_past && date < options.today {
            return RowOutcome::Expired(date);
        }
    }

    let location_text = field(row, &columns.location).to_string();

    RowOutcome::Emit(Event {
        id,
        title: field(row, &columns.title).to_string(),
        start,
        display_end: display_end(&end, end_date),
        end,
        map_targets: map_targets(row, &location_text, options),
        location_text,
        main_link: field(row, &columns.main_link).to_string(),
        note: field(row, &columns.note).to_string(),
    })
}

/// Fan the location text, links and coordinates out into up to three targets.
fn map_targets(row: &Value, location_text: &str, options: &TransformOptions) -> Vec<MapTarget> {
    let columns = &options.columns;
    let names = split_location(location_text);

    (0..MAP_SLOTS)
        .filter_map(|slot| {
            MapTarget::from_parts(
                location_name(&names, slot, &options.placeholder),
                non_empty(field(row, &columns.naver_link(slot))),
                non_empty(field(row, &columns.kakao_link(slot))),
                parse_coordinate(field(row, &columns.coordinate(slot))),
            )
        })
        .collect()
}
