//! CSV reader with encoding and delimiter auto-detection.
//!
//! Converts sheet rows into JSON objects keyed by header. No event-specific
//! logic here: column meaning lives in [`crate::transform`].

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records as JSON objects
    pub records: Vec<Value>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 always wins; chardet is only consulted for legacy exports
/// (Latin-1 or EUC-KR/CP949 from older spreadsheet tools).
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        "euc-kr" | "cp949" | "uhc" | "ks_c_5601-1987" => "euc-kr".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding. A leading byte
/// order mark is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let content = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => {
            let Some(codec) = encoding_rs::Encoding::for_label(label.as_bytes()) else {
                // Unknown label: best effort
                return Ok(strip_bom(String::from_utf8_lossy(bytes).into_owned()));
            };
            let (decoded, _, had_errors) = codec.decode(bytes);
            if had_errors {
                return Err(CsvError::EncodingError(codec.name().to_string()));
            }
            decoded.into_owned()
        }
    };

    Ok(strip_bom(content))
}

fn strip_bom(content: String) -> String {
    match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when the header has a single column.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = DELIMITERS[0];
    let mut best_count = 0;

    for &sep in &DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into JSON objects with an explicit delimiter.
///
/// # Example
/// ```ignore
/// use eventmap::csv_to_json;
///
/// let rows = csv_to_json("name,place\nLive,\"Seoul, Busan\"", ',').unwrap();
/// assert_eq!(rows[0]["place"], "Seoul, Busan");
/// ```
pub fn csv_to_json(csv: &str, delimiter: char) -> CsvResult<Vec<Value>> {
    parse_string_with_metadata(csv, delimiter, "utf-8".to_string()).map(|r| r.records)
}

/// Parse a CSV file, auto-detecting encoding and (unless given) delimiter.
pub fn parse_csv_file_auto<P: AsRef<Path>>(
    path: P,
    delimiter: Option<char>,
) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| CsvError::from_io(path, e))?;

    parse_bytes_auto(&bytes, delimiter)
}

/// Parse CSV bytes, auto-detecting encoding and (unless given) delimiter.
pub fn parse_bytes_auto(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    parse_string_with_metadata(&content, delimiter, encoding)
}

/// Parse CSV text with an explicit delimiter and return metadata.
///
/// Cell values are kept verbatim (no trimming); only header names are
/// trimmed. Empty lines are skipped; rows of blank cells are kept.
pub fn parse_string_with_metadata(
    content: &str,
    delimiter: char,
    encoding: String,
) -> CsvResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let delimiter_byte = u8::try_from(delimiter).map_err(|_| CsvError::ParseError {
        line: 1,
        message: format!("delimiter '{}' is not a single-byte character", delimiter),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let record = result?;

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("");
            obj.insert(header.clone(), Value::String(value.to_string()));
        }

        records.push(Value::Object(obj));
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}
