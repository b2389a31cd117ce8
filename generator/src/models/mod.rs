//! Domain models for the page generator.
//!
//! - [`Event`] - One calendar entry, as embedded in the generated page
//! - [`MapTarget`] - A named point of interest attached to an event
//! - [`Coordinate`] - A latitude/longitude pair

use serde::{Deserialize, Serialize};

/// Number of map slots a source row can carry.
pub const MAP_SLOTS: usize = 3;

// =============================================================================
// Coordinate
// =============================================================================

/// A WGS84 coordinate as written in the sheet (`"lat,lng"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// =============================================================================
// Map Target
// =============================================================================

/// A named place the page can link to or pin on the map.
///
/// Absent links and coordinates are omitted from the JSON payload so the
/// front-end only has to test for presence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapTarget {
    /// Location label shown on buttons and marker popups.
    pub name: String,
    /// Naver Map link.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub naver_link: Option<String>,
    /// Kakao Map link.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kakao_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lng: Option<f64>,
}

impl MapTarget {
    /// Build a target, or `None` when it has nothing to show.
    pub fn from_parts(
        name: String,
        naver_link: Option<String>,
        kakao_link: Option<String>,
        coordinate: Option<Coordinate>,
    ) -> Option<Self> {
        if naver_link.is_none() && kakao_link.is_none() && coordinate.is_none() {
            return None;
        }

        Some(Self {
            name,
            naver_link,
            kakao_link,
            lat: coordinate.map(|c| c.lat),
            lng: coordinate.map(|c| c.lng),
        })
    }

    /// Coordinate of this target, if both halves are present.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

// =============================================================================
// Event
// =============================================================================

/// One event as consumed by the page template.
///
/// `end` is the human-readable last day; `display_end` is the exclusive end
/// the calendar widget needs for spans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Dense 0-based id over emitted events. Cards and calendar entries
    /// correlate on it.
    pub id: usize,
    pub title: String,
    pub start: String,
    pub end: String,
    pub display_end: String,
    pub location_text: String,
    pub map_targets: Vec<MapTarget>,
    pub main_link: String,
    pub note: String,
}

impl Event {
    /// True if at least one target can be pinned on the map.
    pub fn has_coordinates(&self) -> bool {
        self.map_targets.iter().any(|t| t.coordinate().is_some())
    }
}

// =============================================================================
// Tests
// =============================================================================
