//! Dataset-level quality assessment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::QualityThresholds;
use crate::error::{DictError, Result};
use crate::input::DataTable;
use crate::profile::percentage;

use super::checks::{NullPercentageCheck, NumericAsStringCheck, QualityCheck};
use super::issue::QualityIssue;
use super::score::QualityScore;

/// Completeness, duplicates and per-column issues of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub overall_completeness: f64,
    pub columns_with_nulls: usize,
    pub total_null_cells: usize,
    pub duplicate_rows_count: usize,
    pub duplicate_rows_percentage: f64,
    /// Issues in column order; checks run in registration order per column.
    pub quality_issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn score(&self) -> QualityScore {
        QualityScore::compute(self.overall_completeness, self.quality_issues.len())
    }

    pub fn issue_count(&self) -> usize {
        self.quality_issues.len()
    }
}

/// Runs quality checks over a table.
pub struct QualityAssessor {
    checks: Vec<Box<dyn QualityCheck>>,
}

impl QualityAssessor {
    /// Create an assessor with the default checks.
    pub fn new(thresholds: &QualityThresholds) -> Self {
        Self {
            checks: vec![
                Box::new(NullPercentageCheck::new(thresholds)),
                Box::new(NumericAsStringCheck),
            ],
        }
    }

    /// Create an assessor with no checks.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a check, run after those already registered.
    pub fn with_check(mut self, check: impl QualityCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Assess a table. Fails on a table with no rows or no columns.
    pub fn assess(&self, table: &DataTable) -> Result<QualityReport> {
        if table.is_empty() {
            return Err(DictError::InvalidInput(
                "cannot assess quality of an empty dataset".to_string(),
            ));
        }

        let rows = table.row_count();
        let total_cells = rows * table.column_count();
        let null_cells = table.null_cells();
        let duplicates = table.duplicate_row_count();

        let mut issues = Vec::new();
        for column in table.columns() {
            for check in &self.checks {
                if let Some(issue) = check.check(column, rows) {
                    debug!(column = %column.name, check = check.name(), severity = %issue.severity, "Quality issue");
                    issues.push(issue);
                }
            }
        }

        Ok(QualityReport {
            overall_completeness: percentage(total_cells - null_cells, total_cells),
            columns_with_nulls: table.columns().iter().filter(|c| c.null_count() > 0).count(),
            total_null_cells: null_cells,
            duplicate_rows_count: duplicates,
            duplicate_rows_percentage: percentage(duplicates, rows),
            quality_issues: issues,
        })
    }
}

impl Default for QualityAssessor {
    fn default() -> Self {
        Self::new(&QualityThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, DataType, Value};
    use crate::quality::{IssueKind, QualityBand};

    fn make_table(columns: Vec<(&str, Vec<Option<i64>>)>) -> DataTable {
        DataTable::new(
            columns
                .into_iter()
                .map(|(name, values)| {
                    Column::with_type(name, DataType::Integer, values.into_iter().map(Value::from).collect())
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_complete_table() {
        let table = make_table(vec![("a", vec![Some(1), Some(2)]), ("b", vec![Some(3), Some(4)])]);
        let report = QualityAssessor::default().assess(&table).unwrap();

        assert_eq!(report.overall_completeness, 100.0);
        assert_eq!(report.total_null_cells, 0);
        assert_eq!(report.columns_with_nulls, 0);
        assert!(report.quality_issues.is_empty());
    }

    #[test]
    fn test_completeness_and_issue_order() {
        let table = make_table(vec![
            ("a", vec![None, Some(1), Some(2), Some(3)]),
            ("b", vec![Some(1), Some(2), Some(3), Some(4)]),
            ("c", vec![None, None, None, Some(4)]),
        ]);
        let report = QualityAssessor::default().assess(&table).unwrap();

        assert_eq!(report.total_null_cells, 4);
        assert!((report.overall_completeness - 8.0 / 12.0 * 100.0).abs() < 1e-9);
        assert_eq!(report.columns_with_nulls, 2);

        let columns: Vec<&str> = report.quality_issues.iter().map(|i| i.column.as_str()).collect();
        assert_eq!(columns, vec!["a", "c"]);
        assert!(report.quality_issues.iter().all(|i| i.issue == IssueKind::HighNullPercentage));
    }

    #[test]
    fn test_duplicates() {
        let table = make_table(vec![("a", vec![Some(1), Some(1), Some(1), Some(2)])]);
        let report = QualityAssessor::default().assess(&table).unwrap();
        assert_eq!(report.duplicate_rows_count, 2);
        assert_eq!(report.duplicate_rows_percentage, 50.0);
    }

    #[test]
    fn test_score_from_report() {
        let mut values = vec![Some(1); 19];
        values.push(None);
        let table = make_table(vec![("a", values)]);
        let report = QualityAssessor::new(&QualityThresholds {
            max_null_percentage: 1.0,
            high_null_percentage: 50.0,
        })
        .assess(&table)
        .unwrap();

        // 95% complete, one issue
        let score = report.score();
        assert_eq!(score.score, 90.0);
        assert_eq!(score.band, QualityBand::Excellent);
    }

    #[test]
    fn test_empty_table_rejected() {
        let table = DataTable::new(vec![]).unwrap();
        assert!(matches!(
            QualityAssessor::default().assess(&table),
            Err(DictError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_custom_check() {
        struct AlwaysLow;
        impl QualityCheck for AlwaysLow {
            fn name(&self) -> &'static str {
                "always"
            }
            fn check(&self, column: &Column, _rows: usize) -> Option<QualityIssue> {
                Some(QualityIssue::new(&column.name, IssueKind::NumericStoredAsString, crate::quality::Severity::Low))
            }
        }

        let table = make_table(vec![("a", vec![Some(1)]), ("b", vec![Some(2)])]);
        let report = QualityAssessor::empty().with_check(AlwaysLow).assess(&table).unwrap();
        assert_eq!(report.issue_count(), 2);
    }
}
