//! CSV/TSV parser with delimiter detection and column type inference.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::{Column, DataTable, SourceMetadata};
use super::value::{DataType, Value};
use crate::error::{DictError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Tokens read as missing values (compared case-insensitively).
const NULL_TOKENS: &[&str] = &["", "na", "n/a", "null", "none", "nan", "#n/a", "<na>"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Read ISO-8601 date columns as `DateTime` instead of text.
    pub parse_dates: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
            parse_dates: true,
        }
    }
}

/// Parses delimited text files into typed tables.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        info!(path = %path.display(), "Reading dataset");

        let contents = fs::read(path).map_err(|e| DictError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let table = self.parse_with_delimiter(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source = SourceMetadata::new(path.to_path_buf(), hash, contents.len() as u64, format);
        Ok((table, source))
    }

    /// Parse in-memory bytes, detecting the delimiter if not configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_with_delimiter(bytes, delimiter)
    }

    fn parse_with_delimiter(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(DictError::InvalidInput("No columns found".to_string()));
        }

        let width = headers.len();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); width];

        for (row_idx, result) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }

            let record = result?;
            // Short rows are padded with empty (null) cells, long rows truncated
            for (col, column_cells) in cells.iter_mut().enumerate() {
                column_cells.push(record.get(col).unwrap_or("").to_string());
            }
        }

        if cells[0].is_empty() {
            return Err(DictError::InvalidInput("No data rows found".to_string()));
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| {
                let data_type = infer_type(&raw, self.config.parse_dates);
                debug!(column = %name, %data_type, "Inferred column type");
                let values = raw.iter().map(|s| convert(s, data_type)).collect();
                Column::with_type(name, data_type, values)
            })
            .collect();

        DataTable::new(columns)
    }
}

/// Check if a raw token represents a missing value.
pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    NULL_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
}

/// Parse an ISO-8601 date or datetime.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim().trim_end_matches('Z');
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Finite floats only; `inf` and friends stay text.
fn parse_float(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Infer a column's type from its raw tokens, ignoring nulls.
fn infer_type(raw: &[String], parse_dates: bool) -> DataType {
    let tokens: Vec<&str> = raw
        .iter()
        .map(|s| s.trim())
        .filter(|s| !is_null_token(s))
        .collect();

    if tokens.is_empty() {
        return DataType::Float;
    }
    if tokens.iter().all(|t| t.parse::<i64>().is_ok()) {
        return DataType::Integer;
    }
    if tokens.iter().all(|t| parse_float(t).is_some()) {
        return DataType::Float;
    }
    if tokens.iter().all(|t| parse_bool(t).is_some()) {
        return DataType::Boolean;
    }
    if parse_dates && tokens.iter().all(|t| parse_datetime(t).is_some()) {
        return DataType::DateTime;
    }
    DataType::Text
}

fn convert(raw: &str, data_type: DataType) -> Value {
    if is_null_token(raw) {
        return Value::Null;
    }
    let trimmed = raw.trim();
    let value = match data_type {
        DataType::Integer => trimmed.parse().ok().map(Value::Int),
        DataType::Float => parse_float(trimmed).map(Value::Float),
        DataType::Boolean => parse_bool(trimmed).map(Value::Bool),
        DataType::DateTime => parse_datetime(trimmed).map(Value::DateTime),
        DataType::Text => None,
    };
    value.unwrap_or_else(|| Value::Text(raw.to_string()))
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(DictError::InvalidInput("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>()
            / counts.len() as f64;

        // Consistent counts dominate; tab wins ties
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted() {
        let data = b"name;note\n\"Smith, J\";x\n\"Doe, A\";y";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_typed_columns() {
        let data = b"id,name,score,active,joined\n1,Alice,9.5,true,2024-01-15\n2,Bob,NA,False,2024-02-01";
        let table = Parser::new().parse_bytes(data).unwrap();

        assert_eq!(table.column_names(), vec!["id", "name", "score", "active", "joined"]);
        assert_eq!(table.row_count(), 2);

        let types: Vec<DataType> = table.columns().iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![
                DataType::Integer,
                DataType::Text,
                DataType::Float,
                DataType::Boolean,
                DataType::DateTime
            ]
        );
        assert_eq!(table.get(1, 2), Some(&Value::Null));
        assert_eq!(table.get(1, 3), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_dates_as_text_when_disabled() {
        let parser = Parser::with_config(ParserConfig {
            parse_dates: false,
            ..Default::default()
        });
        let table = parser.parse_bytes(b"d\n2024-01-01\n2024-01-02").unwrap();
        assert_eq!(table.columns()[0].data_type, DataType::Text);
    }

    #[test]
    fn test_all_null_column_is_float() {
        let table = Parser::new().parse_bytes(b"a,b\n1,\n2,NULL").unwrap();
        assert_eq!(table.columns()[1].data_type, DataType::Float);
        assert_eq!(table.columns()[1].null_count(), 2);
    }

    #[test]
    fn test_ragged_rows_padded() {
        let table = Parser::new().parse_bytes(b"a,b,c\n1,2\n3,4,5,6").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 2), Some(&Value::Null));
        assert_eq!(table.get(1, 2), Some(&Value::Int(5)));
    }

    #[test]
    fn test_header_only_is_invalid() {
        let err = Parser::new().parse_bytes(b"a,b,c\n").unwrap_err();
        assert!(matches!(err, DictError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let err = Parser::new().parse_bytes(b"").unwrap_err();
        assert!(matches!(err, DictError::InvalidInput(_)));
    }

    #[test]
    fn test_is_null_token() {
        for token in ["", "  ", "NA", "na", "N/A", "null", "NULL", "None", "NaN", "#N/A", "<NA>"] {
            assert!(is_null_token(token), "{token:?} should be null");
        }
        assert!(!is_null_token("value"));
        assert!(!is_null_token("0"));
        assert!(!is_null_token("."));
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert!(parse_datetime("2024-03-01").is_some());
        assert!(parse_datetime("2024-03-01T10:20:30").is_some());
        assert!(parse_datetime("2024-03-01 10:20:30.250").is_some());
        assert!(parse_datetime("2024-03-01T10:20:30Z").is_some());
        assert!(parse_datetime("03/01/2024").is_none());
    }

    #[test]
    fn test_infinite_tokens_stay_text() {
        let table = Parser::new().parse_bytes(b"x,y\n1.5,2\ninf,-Infinity\n2.0,3").unwrap();
        let x = table.column("x").unwrap();
        assert_eq!(x.data_type, DataType::Text);
        assert_eq!(x.values[1], Value::Text("inf".into()));
        assert_eq!(table.column("y").unwrap().data_type, DataType::Text);
    }
}
