//! JSON Schema validation of the embedded event payload.
//!
//! The page template reads events by key (`id`, `displayEnd`,
//! `mapTargets[].lat`, ...). Checking the serialized payload against
//! `schemas/events.json` (JSON Schema Draft 7) catches a drift between the
//! Rust models and what the page expects before anything is written.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use eventmap::validation::is_valid_events;
//!
//! let events = json!([{
//!     "id": 0, "title": "Live", "start": "2025-04-01", "end": "2025-04-30",
//!     "displayEnd": "2025-05-01", "locationText": "", "mapTargets": [],
//!     "mainLink": "", "note": ""
//! }]);
//! assert!(is_valid_events(&events));
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::ValidationError;

/// Maximum number of schema errors carried in a [`ValidationError`].
const MAX_REPORTED_ERRORS: usize = 10;

static EVENTS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/events.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// Returns every error message, or a single message if the schema itself
/// does not compile.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a serialized event list against the page contract.
pub fn validate_events(data: &Value) -> Result<(), ValidationError> {
    let validator = jsonschema::draft7::new(&EVENTS_SCHEMA)
        .map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .take(MAX_REPORTED_ERRORS)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::SchemaError { errors })
    }
}

/// Quick check against the event list schema.
pub fn is_valid_events(data: &Value) -> bool {
    is_valid(&EVENTS_SCHEMA, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Event, MapTarget};
    use serde_json::json;

    fn sample_event() -> Event {
        Event {
            id: 0,
            title: "Live".into(),
            start: "2025-04-01".into(),
            end: "2025-04-30".into(),
            display_end: "2025-05-01".into(),
            location_text: "Hall A, Hall B".into(),
            map_targets: vec![
                MapTarget::from_parts("Hall A".into(), Some("https://naver.me/a".into()), None, None)
                    .unwrap(),
                MapTarget::from_parts("Hall B".into(), None, None, Some(Coordinate::new(37.5, 127.0)))
                    .unwrap(),
            ],
            main_link: String::new(),
            note: String::new(),
        }
    }

    #[test]
    fn test_serialized_events_are_valid() {
        let payload = serde_json::to_value(vec![sample_event()]).unwrap();
        assert!(validate_events(&payload).is_ok());
        assert!(is_valid_events(&payload));
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(is_valid_events(&json!([])));
    }

    #[test]
    fn test_missing_display_end_is_invalid() {
        let payload = json!([{
            "id": 0, "title": "x", "start": "", "end": "",
            "locationText": "", "mapTargets": [], "mainLink": "", "note": ""
        }]);

        let err = validate_events(&payload).unwrap_err();
        assert!(matches!(err, ValidationError::SchemaError { .. }));
        assert!(err.to_string().contains("displayEnd"));
    }

    #[test]
    fn test_too_many_targets_is_invalid() {
        let mut event = sample_event();
        event.map_targets = vec![event.map_targets[0].clone(); 4];
        let payload = serde_json::to_value(vec![event]).unwrap();

        assert!(!is_valid_events(&payload));
    }

    #[test]
    fn test_empty_target_is_invalid() {
        let payload = json!([{
            "id": 0, "title": "x", "start": "", "end": "", "displayEnd": "",
            "locationText": "", "mapTargets": [{ "name": "nowhere" }],
            "mainLink": "", "note": ""
        }]);

        assert!(!is_valid_events(&payload));
    }

    #[test]
    fn test_generic_validate() {
        let schema = json!({
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        });

        assert!(validate(&schema, &json!({ "name": "test" })).is_ok());
        assert!(validate(&schema, &json!({ "age": 42 })).is_err());
    }
}
