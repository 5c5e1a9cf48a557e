//! Column and dataset profiling.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::column::{CategoricalStats, ColumnKind, ColumnProfile, TemporalStats, TextStats};
use super::correlation::CorrelationReport;
use super::patterns::PatternDetector;
use super::stats::{percentage, with_thousands, NumericStats};
use crate::config::ProfilingConfig;
use crate::error::{DictError, Result};
use crate::input::{Column, DataTable, DataType, ISO_FORMAT};
use crate::quality::{QualityAssessor, QualityReport};

/// Table-level facts gathered alongside the column profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub row_count: usize,
    pub column_count: usize,
    pub estimated_size_bytes: u64,
    pub duplicate_rows: usize,
    pub columns: Vec<String>,
    pub dtypes: IndexMap<String, DataType>,
}

impl BasicInfo {
    pub fn size_mb(&self) -> f64 {
        self.estimated_size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Full profile of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub dataset_name: String,
    pub profiled_at: DateTime<Utc>,
    pub basic_info: BasicInfo,
    /// Column profiles in table order.
    pub columns: Vec<ColumnProfile>,
    pub quality: QualityReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlations: Option<CorrelationReport>,
}

impl DatasetProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Plain-text summary for terminals and logs.
    pub fn summary(&self) -> String {
        let basic = &self.basic_info;
        let quality = &self.quality;
        let rule = "=".repeat(60);

        format!(
            "\nData Profile Summary: {name}\n{rule}\n\
             Dataset Information:\n\
             \x20 - Rows: {rows}\n\
             \x20 - Columns: {cols}\n\
             \x20 - Estimated Size: {size:.2} MB\n\
             \x20 - Duplicate Rows: {dups}\n\n\
             Data Quality:\n\
             \x20 - Overall Completeness: {completeness:.2}%\n\
             \x20 - Columns with Nulls: {with_nulls}\n\
             \x20 - Total Null Cells: {nulls}\n\
             \x20 - Quality Issues Found: {issues}\n\n\
             {rule}\n",
            name = self.dataset_name,
            rows = with_thousands(basic.row_count),
            cols = basic.column_count,
            size = basic.size_mb(),
            dups = with_thousands(basic.duplicate_rows),
            completeness = quality.overall_completeness,
            with_nulls = quality.columns_with_nulls,
            nulls = with_thousands(quality.total_null_cells),
            issues = quality.quality_issues.len(),
        )
    }
}

/// Computes column profiles, quality and correlations.
#[derive(Debug, Clone)]
pub struct Profiler {
    config: ProfilingConfig,
    patterns: PatternDetector,
}

impl Profiler {
    pub fn new(config: ProfilingConfig) -> Self {
        let patterns = PatternDetector::new(config.pattern_sample_size);
        Self { config, patterns }
    }

    /// Profile every column and assess quality. Fails on an empty table.
    pub fn profile(&self, table: &DataTable, dataset_name: &str) -> Result<DatasetProfile> {
        info!(dataset = dataset_name, rows = table.row_count(), columns = table.column_count(), "Profiling dataset");

        let columns = self.profile_columns(table)?;
        let quality = QualityAssessor::new(&self.config.quality_thresholds).assess(table)?;

        let correlations = if self.config.correlation_analysis {
            CorrelationReport::compute(table, self.config.correlation_threshold)
        } else {
            None
        };

        let basic_info = BasicInfo {
            row_count: table.row_count(),
            column_count: table.column_count(),
            estimated_size_bytes: table.estimated_size_bytes(),
            duplicate_rows: quality.duplicate_rows_count,
            columns: table.column_names(),
            dtypes: table
                .columns()
                .iter()
                .map(|c| (c.name.clone(), c.data_type))
                .collect(),
        };

        Ok(DatasetProfile {
            dataset_name: dataset_name.to_string(),
            profiled_at: Utc::now(),
            basic_info,
            columns,
            quality,
            correlations,
        })
    }

    /// Profile each column of a table, in table order.
    pub fn profile_columns(&self, table: &DataTable) -> Result<Vec<ColumnProfile>> {
        if table.is_empty() {
            return Err(DictError::InvalidInput(format!(
                "cannot profile an empty dataset ({} rows, {} columns)",
                table.row_count(),
                table.column_count()
            )));
        }

        table
            .columns()
            .iter()
            .map(|c| self.profile_column(c, table.row_count()))
            .collect()
    }

    /// Profile a single column. `row_count` is the table's row count and
    /// must be non-zero.
    pub fn profile_column(&self, column: &Column, row_count: usize) -> Result<ColumnProfile> {
        if row_count == 0 {
            return Err(DictError::InvalidInput(format!(
                "cannot profile column '{}' of a dataset with no rows",
                column.name
            )));
        }

        let null_count = column.null_count();
        let unique_count = column.distinct_count();

        let stats = match column.data_type {
            DataType::Integer | DataType::Float => {
                ColumnKind::Numeric(NumericStats::from_values(column.non_null().filter_map(|v| v.as_f64())))
            }
            DataType::Boolean => ColumnKind::Categorical(CategoricalStats {
                top_values: self.top_values(column),
            }),
            DataType::DateTime => ColumnKind::Temporal(temporal_stats(column)),
            DataType::Text if unique_count < self.config.categorical_threshold => {
                ColumnKind::Categorical(CategoricalStats {
                    top_values: self.top_values(column),
                })
            }
            DataType::Text => ColumnKind::Text(self.text_stats(column)),
        };

        let detected_patterns = if column.data_type == DataType::Text {
            self.patterns.detect(column)
        } else {
            IndexMap::new()
        };

        let sample_values = column
            .non_null()
            .take(self.config.sample_values)
            .map(|v| v.to_string())
            .collect();

        debug!(column = %column.name, kind = ?column.data_type, null_count, unique_count, "Profiled column");

        Ok(ColumnProfile {
            name: column.name.clone(),
            declared_type: column.data_type,
            null_count,
            null_percentage: percentage(null_count, row_count),
            unique_count,
            unique_percentage: percentage(unique_count, row_count),
            stats,
            sample_values,
            detected_patterns,
        })
    }

    /// Most frequent values; ties keep first-encountered order.
    fn top_values(&self, column: &Column) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for value in column.non_null() {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }

        // Stable sort keeps insertion order among equal counts
        counts.sort_by(|_, a, _, b| b.cmp(a));
        counts.truncate(self.config.top_values);
        counts
    }

    fn text_stats(&self, column: &Column) -> TextStats {
        let lengths: Vec<usize> = column
            .non_null()
            .map(|v| v.to_string().chars().count())
            .collect();

        let avg_length =
            (!lengths.is_empty()).then(|| lengths.iter().sum::<usize>() as f64 / lengths.len() as f64);

        TextStats {
            top_values: self.top_values(column),
            min_length: lengths.iter().min().copied(),
            max_length: lengths.iter().max().copied(),
            avg_length,
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(ProfilingConfig::default())
    }
}

fn temporal_stats(column: &Column) -> TemporalStats {
    let dates: Vec<_> = column.non_null().filter_map(|v| v.as_datetime()).collect();
    let min = dates.iter().min().copied();
    let max = dates.iter().max().copied();

    TemporalStats {
        min_date: min.map(|d| d.format(ISO_FORMAT).to_string()),
        max_date: max.map(|d| d.format(ISO_FORMAT).to_string()),
        date_range_days: min.zip(max).map(|(lo, hi)| (hi - lo).num_days()),
    }
}
