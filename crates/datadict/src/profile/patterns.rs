//! Regex-based classification of text column content.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::input::Column;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?1?\d{9,15}$").unwrap());

// e.g. CUST1001, ORD001
static ID_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3,4}\d{3,4}$").unwrap());

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s]+$").unwrap());

/// Patterns in reporting order.
static PATTERNS: [(&str, &Lazy<Regex>); 4] = [
    ("email", &EMAIL),
    ("phone", &PHONE),
    ("id_code", &ID_CODE),
    ("url", &URL),
];

/// How many sampled values matched a pattern. Rendered as `"matches/sample_size"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PatternMatch {
    pub matches: usize,
    pub sample_size: usize,
}

impl fmt::Display for PatternMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.matches, self.sample_size)
    }
}

impl FromStr for PatternMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (matches, sample_size) = s
            .split_once('/')
            .ok_or_else(|| format!("expected 'matches/sample_size', got '{}'", s))?;
        Ok(Self {
            matches: matches.trim().parse().map_err(|e| format!("{}", e))?,
            sample_size: sample_size.trim().parse().map_err(|e| format!("{}", e))?,
        })
    }
}

impl From<PatternMatch> for String {
    fn from(m: PatternMatch) -> Self {
        m.to_string()
    }
}

impl TryFrom<String> for PatternMatch {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Classify a sample of values.
///
/// Each pattern is matched independently against the whole value; only
/// patterns with at least one match appear in the result.
pub fn detect_patterns<S: AsRef<str>>(sample: &[S]) -> IndexMap<String, PatternMatch> {
    let mut detected = IndexMap::new();

    for (name, regex) in PATTERNS.iter() {
        let matches = sample.iter().filter(|v| regex.is_match(v.as_ref())).count();
        if matches > 0 {
            detected.insert(
                name.to_string(),
                PatternMatch {
                    matches,
                    sample_size: sample.len(),
                },
            );
        }
    }

    detected
}

/// Samples a column's leading non-null values and runs [`detect_patterns`].
#[derive(Debug, Clone)]
pub struct PatternDetector {
    sample_size: usize,
}

impl PatternDetector {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    pub fn detect(&self, column: &Column) -> IndexMap<String, PatternMatch> {
        let sample: Vec<String> = column
            .non_null()
            .take(self.sample_size)
            .map(|v| v.to_string())
            .collect();
        detect_patterns(&sample)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;

    #[test]
    fn test_email_pattern() {
        let found = detect_patterns(&["alice@example.com", "bob@test.org", "not-an-email"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found["email"].to_string(), "2/3");
    }

    #[test]
    fn test_no_match_is_absent() {
        let found = detect_patterns(&["hello", "world"]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_value_can_match_several_patterns() {
        // 10 digits: phone only; CUST1001: id_code only
        let found = detect_patterns(&["5551234567", "CUST1001", "https://example.com/a"]);
        let names: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["phone", "id_code", "url"]);
        assert_eq!(found["phone"].matches, 1);
        assert_eq!(found["url"].sample_size, 3);
    }

    #[test]
    fn test_phone_variants() {
        let found = detect_patterns(&["+15551234567", "123", "555-123-4567"]);
        assert_eq!(found["phone"].to_string(), "1/3");
    }

    #[test]
    fn test_id_code_is_case_sensitive() {
        let found = detect_patterns(&["cust1001", "ORD001", "ABCDE1234"]);
        assert_eq!(found["id_code"].to_string(), "1/3");
    }

    #[test]
    fn test_url_rejects_whitespace() {
        let found = detect_patterns(&["http://a.com/x y", "ftp://a.com"]);
        assert!(!found.contains_key("url"));
    }

    #[test]
    fn test_detector_samples_non_null_prefix() {
        let mut values: Vec<Value> = vec![Value::Null];
        values.extend((0..150).map(|i| Value::Text(format!("user{}@mail.com", i))));
        let column = Column::new("email", values);

        let found = PatternDetector::new(100).detect(&column);
        assert_eq!(found["email"], PatternMatch { matches: 100, sample_size: 100 });
    }

    #[test]
    fn test_pattern_match_serde() {
        let m = PatternMatch { matches: 3, sample_size: 5 };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"3/5\"");
        let back: PatternMatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
