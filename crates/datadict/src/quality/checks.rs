//! Per-column quality checks.

use crate::config::QualityThresholds;
use crate::input::{Column, DataType};
use crate::profile::percentage;

use super::issue::{IssueKind, QualityIssue, Severity};

/// A rule evaluated against every column of a table.
pub trait QualityCheck: Send + Sync {
    /// Stable name of the check, used in logs.
    fn name(&self) -> &'static str;

    /// Inspect one column and report an issue if the rule is violated.
    fn check(&self, column: &Column, row_count: usize) -> Option<QualityIssue>;
}

/// Flags columns whose null percentage exceeds a threshold.
#[derive(Debug, Clone)]
pub struct NullPercentageCheck {
    max_null_percentage: f64,
    high_null_percentage: f64,
}

impl NullPercentageCheck {
    pub fn new(thresholds: &QualityThresholds) -> Self {
        Self {
            max_null_percentage: thresholds.max_null_percentage,
            high_null_percentage: thresholds.high_null_percentage,
        }
    }
}

impl Default for NullPercentageCheck {
    fn default() -> Self {
        Self::new(&QualityThresholds::default())
    }
}

impl QualityCheck for NullPercentageCheck {
    fn name(&self) -> &'static str {
        "null_percentage"
    }

    fn check(&self, column: &Column, row_count: usize) -> Option<QualityIssue> {
        let null_pct = percentage(column.null_count(), row_count);
        if null_pct <= self.max_null_percentage {
            return None;
        }

        let severity = if null_pct > self.high_null_percentage {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(
            QualityIssue::new(&column.name, IssueKind::HighNullPercentage, severity)
                .with_detail(format!("{:.2}%", null_pct)),
        )
    }
}

/// Flags text columns whose every non-null value parses as a number.
#[derive(Debug, Clone, Default)]
pub struct NumericAsStringCheck;

impl QualityCheck for NumericAsStringCheck {
    fn name(&self) -> &'static str {
        "numeric_as_string"
    }

    fn check(&self, column: &Column, _row_count: usize) -> Option<QualityIssue> {
        if column.data_type != DataType::Text {
            return None;
        }

        let mut values = column.non_null().peekable();
        // An all-null column says nothing about its content
        values.peek()?;

        let all_numeric = values.all(|v| match v.as_text() {
            Some(s) => s.trim().parse::<f64>().is_ok(),
            None => v.as_f64().is_some(),
        });

        all_numeric.then(|| QualityIssue::new(&column.name, IssueKind::NumericStoredAsString, Severity::Low))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;

    fn text_column(values: &[Option<&str>]) -> Column {
        Column::with_type(
            "col",
            DataType::Text,
            values.iter().map(|v| Value::from(*v)).collect(),
        )
    }

    fn with_nulls(nulls: usize, total: usize) -> Column {
        let values = (0..total)
            .map(|i| if i < nulls { Value::Null } else { Value::Int(i as i64) })
            .collect();
        Column::with_type("col", DataType::Integer, values)
    }

    #[test]
    fn test_null_check_below_threshold() {
        let check = NullPercentageCheck::default();
        assert!(check.check(&with_nulls(1, 10), 10).is_none());
    }

    #[test]
    fn test_null_check_at_threshold_is_not_flagged() {
        let check = NullPercentageCheck::default();
        assert!(check.check(&with_nulls(10, 100), 100).is_none());
    }

    #[test]
    fn test_null_check_medium() {
        let check = NullPercentageCheck::default();
        let issue = check.check(&with_nulls(15, 100), 100).unwrap();
        assert_eq!(issue.issue, IssueKind::HighNullPercentage);
        assert_eq!(issue.severity, Severity::Medium);
        assert_eq!(issue.detail.as_deref(), Some("15.00%"));
    }

    #[test]
    fn test_null_check_high() {
        let check = NullPercentageCheck::default();
        let issue = check.check(&with_nulls(60, 100), 100).unwrap();
        assert_eq!(issue.severity, Severity::High);
    }

    #[test]
    fn test_null_check_custom_threshold() {
        let check = NullPercentageCheck::new(&QualityThresholds {
            max_null_percentage: 20.0,
            high_null_percentage: 50.0,
        });
        assert!(check.check(&with_nulls(15, 100), 100).is_none());
    }

    #[test]
    fn test_numeric_as_string() {
        let check = NumericAsStringCheck;
        let issue = check
            .check(&text_column(&[Some("1"), Some(" 2.5 "), None, Some("-3e2")]), 4)
            .unwrap();
        assert_eq!(issue.severity, Severity::Low);
    }

    #[test]
    fn test_numeric_as_string_suppressed_by_text() {
        let check = NumericAsStringCheck;
        assert!(check.check(&text_column(&[Some("1"), Some("two")]), 2).is_none());
    }

    #[test]
    fn test_numeric_as_string_needs_a_value() {
        let check = NumericAsStringCheck;
        assert!(check.check(&text_column(&[None, None]), 2).is_none());
    }

    #[test]
    fn test_numeric_as_string_ignores_numeric_columns() {
        let check = NumericAsStringCheck;
        assert!(check.check(&with_nulls(0, 5), 5).is_none());
    }

    #[test]
    fn test_numeric_as_string_ignores_mixed_kinds() {
        let column = Column::with_type("col", DataType::Text, vec!["12".into(), Value::Bool(true)]);
        assert!(NumericAsStringCheck.check(&column, 2).is_none());

        let column = Column::with_type("col", DataType::Text, vec!["12".into(), Value::Float(1.5)]);
        assert!(NumericAsStringCheck.check(&column, 2).is_some());
    }
}
