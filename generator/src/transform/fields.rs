//! Per-field parsers.
//!
//! Every parser here is total: malformed input yields `None` (or the raw
//! text, for the display end date) and never an error.

use chrono::NaiveDate;
use serde_json::Value;

use crate::models::Coordinate;

/// Date format of the sheet's start/end columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a text cell; missing columns and non-string values read as `""`.
pub fn field<'a>(row: &'a Value, column: &str) -> &'a str {
    row.get(column).and_then(|v| v.as_str()).unwrap_or("")
}

/// `Some(text)` for a non-blank cell, trimmed.
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Exclusive end date for the calendar widget: the day after `end`, or
/// `end` unchanged when it is not a date.
pub fn display_end(end: &str, parsed: Option<NaiveDate>) -> String {
    parsed
        .and_then(|date| date.succ_opt())
        .map(|next| next.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| end.to_string())
}

/// Parse a `"lat,lng"` cell.
///
/// Requires exactly one comma and two finite numbers.
pub fn parse_coordinate(text: &str) -> Option<Coordinate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (lat, lng) = text.split_once(',')?;
    if lng.contains(',') {
        return None;
    }

    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }

    Some(Coordinate::new(lat, lng))
}

/// Split a location cell on commas, trimming each segment.
///
/// A cell with only blank segments has no names at all, so callers fall
/// back to a placeholder. Interior blank segments stay in place to keep
/// slot positions aligned.
pub fn split_location(text: &str) -> Vec<String> {
    let names: Vec<String> = text.split(',').map(|s| s.trim().to_string()).collect();

    if names.iter().all(|n| n.is_empty()) {
        Vec::new()
    } else {
        names
    }
}

/// Name of the map target in `slot` (0-based).
///
/// Uses the slot's own segment, else the first segment, else the
/// placeholder with `{n}` replaced by the 1-based slot number.
pub fn location_name(names: &[String], slot: usize, placeholder: &str) -> String {
    match names.get(slot).or_else(|| names.first()) {
        Some(name) => name.clone(),
        None => placeholder.replace("{n}", &(slot + 1).to_string()),
    }
}
