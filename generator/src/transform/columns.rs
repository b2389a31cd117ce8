//! Column names of the event sheet.
//!
//! The three map slots follow the sheet's positional convention: link
//! columns are unsuffixed for slot 1 and suffixed `2`/`3` afterwards, while
//! coordinate columns are suffixed `1..=3`.

/// Header names used to look up each field of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub title: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub main_link: String,
    pub note: String,
    /// Prefix of the `"lat,lng"` columns (`좌표1`, `좌표2`, `좌표3`).
    pub coordinate_prefix: String,
    /// Prefix of the Naver Map link columns (`네이버지도`, `네이버지도2`, ...).
    pub naver_prefix: String,
    /// Prefix of the Kakao Map link columns (`다음지도`, `다음지도2`, ...).
    pub kakao_prefix: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            title: "이벤트명".to_string(),
            start: "시작기간".to_string(),
            end: "종료기간".to_string(),
            location: "장소".to_string(),
            main_link: "통합정보모음".to_string(),
            note: "비고".to_string(),
            coordinate_prefix: "좌표".to_string(),
            naver_prefix: "네이버지도".to_string(),
            kakao_prefix: "다음지도".to_string(),
        }
    }
}

impl Columns {
    /// Coordinate column for a 0-based slot.
    pub fn coordinate(&self, slot: usize) -> String {
        format!("{}{}", self.coordinate_prefix, slot + 1)
    }

    /// Naver link column for a 0-based slot.
    pub fn naver_link(&self, slot: usize) -> String {
        link_column(&self.naver_prefix, slot)
    }

    /// Kakao link column for a 0-based slot.
    pub fn kakao_link(&self, slot: usize) -> String {
        link_column(&self.kakao_prefix, slot)
    }
}

fn link_column(prefix: &str, slot: usize) -> String {
    if slot == 0 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, slot + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_suffixes() {
        let columns = Columns::default();

        assert_eq!(columns.coordinate(0), "좌표1");
        assert_eq!(columns.coordinate(2), "좌표3");
        assert_eq!(columns.naver_link(0), "네이버지도");
        assert_eq!(columns.naver_link(1), "네이버지도2");
        assert_eq!(columns.kakao_link(0), "다음지도");
        assert_eq!(columns.kakao_link(2), "다음지도3");
    }
}
