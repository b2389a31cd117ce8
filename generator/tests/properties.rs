//! Property tests for the row transformer.

use chrono::NaiveDate;
use eventmap::{transform_rows, TransformOptions, MAP_SLOTS};
use proptest::prelude::*;
use serde_json::{json, Value};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn end_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..=12, 1u32..=28).prop_map(|(m, d)| format!("2025-{:02}-{:02}", m, d)),
        Just(String::new()),
        Just("미정".to_string()),
        Just("2025/06/01".to_string()),
    ]
}

fn coordinate_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-90.0f64..90.0, -180.0f64..180.0).prop_map(|(lat, lng)| format!("{},{}", lat, lng)),
        Just(String::new()),
        Just("abc".to_string()),
        Just("1,2,3".to_string()),
    ]
}

fn row() -> impl Strategy<Value = Value> {
    (
        "[a-z가-힣 ]{0,12}",
        end_cell(),
        "[a-z, ]{0,16}",
        prop::collection::vec(coordinate_cell(), MAP_SLOTS),
        prop::option::of("https://[a-z]{1,8}\\.com"),
    )
        .prop_map(|(title, end, location, coords, naver)| {
            json!({
                "이벤트명": title,
                "시작기간": "2025-01-01",
                "종료기간": end,
                "장소": location,
                "좌표1": coords[0],
                "좌표2": coords[1],
                "좌표3": coords[2],
                "네이버지도": naver.unwrap_or_default(),
            })
        })
}

// =========================================================================
// Transformer properties
// =========================================================================

proptest! {
    #[test]
    fn test_ids_are_dense(rows in prop::collection::vec(row(), 0..20), hide_past in any::<bool>()) {
        let options = TransformOptions::new(today()).with_hide_past(hide_past);
        let result = transform_rows(&rows, &options);

        for (i, event) in result.events.iter().enumerate() {
            prop_assert_eq!(event.id, i);
        }
        prop_assert_eq!(result.events.len() + result.expired.len(), rows.len());
    }

    #[test]
    fn test_unfiltered_keeps_every_row(rows in prop::collection::vec(row(), 0..20)) {
        let result = transform_rows(&rows, &TransformOptions::new(today()));

        prop_assert_eq!(result.events.len(), rows.len());
        prop_assert!(result.expired.is_empty());
    }

    #[test]
    fn test_expired_rows_end_before_today(rows in prop::collection::vec(row(), 0..20)) {
        let options = TransformOptions::new(today()).with_hide_past(true);
        let result = transform_rows(&rows, &options);

        for expired in &result.expired {
            prop_assert!(expired.end < today());
        }
    }

    #[test]
    fn test_map_targets_are_bounded(rows in prop::collection::vec(row(), 0..20)) {
        let result = transform_rows(&rows, &TransformOptions::new(today()));

        for event in &result.events {
            prop_assert!(event.map_targets.len() <= MAP_SLOTS);
            for target in &event.map_targets {
                prop_assert_eq!(target.lat.is_some(), target.lng.is_some());
                if let Some(lat) = target.lat {
                    prop_assert!(lat.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_transform_is_deterministic(rows in prop::collection::vec(row(), 0..10)) {
        let options = TransformOptions::new(today()).with_hide_past(true);
        let first = serde_json::to_string(&transform_rows(&rows, &options).events).unwrap();
        let second = serde_json::to_string(&transform_rows(&rows, &options).events).unwrap();

        prop_assert_eq!(first, second);
    }
}
