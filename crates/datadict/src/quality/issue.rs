//! Quality issue types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of quality issue detected on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Null percentage above the configured threshold.
    HighNullPercentage,
    /// Text column whose values all parse as numbers.
    NumericStoredAsString,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::HighNullPercentage => "high_null_percentage",
            IssueKind::NumericStoredAsString => "numeric_stored_as_string",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::HighNullPercentage => "High Null Percentage",
            IssueKind::NumericStoredAsString => "Numeric Stored As String",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quality problem found on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub column: String,
    pub issue: IssueKind,
    /// Measured value behind the issue, e.g. `"15.00%"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub severity: Severity,
}

impl QualityIssue {
    pub fn new(column: impl Into<String>, issue: IssueKind, severity: Severity) -> Self {
        Self {
            column: column.into(),
            issue,
            detail: None,
            severity,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
