//! Page serializer: events + fixed template → one HTML document.
//!
//! Events are serialized with `serde_json` and embedded in a `<script>`
//! block. No event semantics change here.

use serde::Serialize;

use crate::error::{RenderError, RenderResult};
use crate::models::{Coordinate, Event};

const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");

/// Presentation settings for the generated page.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// `<html lang>` attribute.
    pub lang: String,
    /// `<title>` text.
    pub page_title: String,
    /// Heading above the card list. Newlines become line breaks.
    pub heading: String,
    /// Footer credit line.
    pub credits: String,
    /// Text shown in the detail panel before an event is selected.
    pub empty_message: String,
    pub naver_label: String,
    pub kakao_label: String,
    pub main_link_label: String,
    /// Initial map center.
    pub map_center: Coordinate,
    pub map_zoom: u8,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lang: "ko".to_string(),
            page_title: "BanG Dream! 한국 오프라인 이벤트 목록".to_string(),
            heading: "BanG Dream!\n한국 오프라인 이벤트 목록".to_string(),
            credits: "made by Bangbung Kim".to_string(),
            empty_message: "이벤트를 선택하면\n여기에 상세 정보가 나옵니다!".to_string(),
            naver_label: "N 네이버지도".to_string(),
            kakao_label: "K 카카오맵".to_string(),
            main_link_label: "👉 통합 정보 확인하기".to_string(),
            // Seoul City Hall
            map_center: Coordinate::new(37.5665, 126.9780),
            map_zoom: 11,
        }
    }
}

/// Settings the page script reads at startup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfig<'a> {
    naver_label: &'a str,
    kakao_label: &'a str,
    main_link_label: &'a str,
    map_center: [f64; 2],
    map_zoom: u8,
}

impl<'a> From<&'a PageConfig> for ClientConfig<'a> {
    fn from(config: &'a PageConfig) -> Self {
        Self {
            naver_label: &config.naver_label,
            kakao_label: &config.kakao_label,
            main_link_label: &config.main_link_label,
            map_center: [config.map_center.lat, config.map_center.lng],
            map_zoom: config.map_zoom,
        }
    }
}

/// Render the full HTML document.
pub fn render_page(events: &[Event], config: &PageConfig) -> RenderResult<String> {
    let values = [
        ("lang", escape_html(&config.lang)),
        ("page_title", escape_html(&config.page_title)),
        ("heading", escape_multiline(&config.heading)),
        ("credits", escape_html(&config.credits)),
        ("empty_message", escape_multiline(&config.empty_message)),
        ("config_json", embed_json(&ClientConfig::from(config))?),
        ("events_json", embed_json(events)?),
    ];

    fill_template(PAGE_TEMPLATE, &values)
}

/// Serialize a value as JSON that is safe inside a `<script>` element.
///
/// `<`, `>` and `&` are escaped so the payload can never close the script
/// element or open a comment; U+2028/U+2029 are escaped because older JS
/// engines treat them as line terminators. The result is still valid JSON.
pub fn embed_json<T: Serialize + ?Sized>(value: &T) -> RenderResult<String> {
    let json = serde_json::to_string(value)?;

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_multiline(text: &str) -> String {
    text.lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Replace `{{name}}` placeholders in a single pass.
///
/// Inserted values are never rescanned, so event text containing `{{...}}`
/// is emitted as-is. Unknown placeholders are an error.
fn fill_template(template: &str, values: &[(&str, String)]) -> RenderResult<String> {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];

        let close = after
            .find("}}")
            .ok_or_else(|| RenderError::UnfilledPlaceholder(after.chars().take(32).collect()))?;
        let key = after[..close].trim();

        let (_, value) = values
            .iter()
            .find(|(name, _)| *name == key)
            .ok_or_else(|| RenderError::UnfilledPlaceholder(key.to_string()))?;

        out.push_str(value);
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MapTarget;

    fn event(title: &str) -> Event {
        Event {
            id: 0,
            title: title.into(),
            start: "2025-04-01".into(),
            end: "2025-04-30".into(),
            display_end: "2025-05-01".into(),
            location_text: "Hall".into(),
            map_targets: vec![MapTarget::from_parts(
                "Hall".into(),
                None,
                None,
                Some(Coordinate::new(37.5, 127.0)),
            )
            .unwrap()],
            main_link: String::new(),
            note: String::new(),
        }
    }

    #[test]
    fn test_embed_json_cannot_close_script() {
        let json = embed_json(&vec![event("</script><script>alert(1)</script>")]).unwrap();

        assert!(!json.contains("</script>"));
        assert!(!json.contains('<'));
        assert!(json.contains("\\u003c/script\\u003e"));

        // Still valid JSON with the original text.
        let back: Vec<Event> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0].title, "</script><script>alert(1)</script>");
    }

    #[test]
    fn test_embed_json_escapes_line_separators() {
        let json = embed_json("a\u{2028}b\u{2029}c & d").unwrap();
        assert_eq!(json, "\"a\\u2028b\\u2029c \\u0026 d\"");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_multiline("a<\nb"), "a&lt;<br>b");
    }

    #[test]
    fn test_fill_template_single_pass() {
        let values = [("a", "{{b}}".to_string()), ("b", "B".to_string())];
        let out = fill_template("[{{a}}|{{ b }}]", &values).unwrap();
        assert_eq!(out, "[{{b}}|B]");
    }

    #[test]
    fn test_fill_template_unknown_placeholder() {
        let err = fill_template("x {{nope}} y", &[]).unwrap_err();
        assert!(matches!(err, RenderError::UnfilledPlaceholder(ref k) if k == "nope"));
    }

    #[test]
    fn test_render_page_embeds_events_and_config() {
        let config = PageConfig {
            page_title: "Events & More".into(),
            ..PageConfig::default()
        };
        let html = render_page(&[event("라이브 {{heading}}")], &config).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"ko\">"));
        assert!(html.contains("<title>Events &amp; More</title>"));
        assert!(html.contains("BanG Dream!<br>한국 오프라인 이벤트 목록"));
        assert!(html.contains("\"displayEnd\":\"2025-05-01\""));
        assert!(html.contains("라이브 {{heading}}"));
        assert!(html.contains("\"mapCenter\":[37.5665,126.978]"));
        assert!(!html.contains("{{events_json}}"));
    }

    #[test]
    fn test_render_page_without_events() {
        let html = render_page(&[], &PageConfig::default()).unwrap();
        assert!(html.contains("const events = [];"));
    }
}
