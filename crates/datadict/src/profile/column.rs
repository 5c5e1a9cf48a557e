//! Per-column profile model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::patterns::PatternMatch;
use super::stats::NumericStats;
use crate::input::DataType;

/// Statistics of a column, by the kind of values it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or float values.
    Numeric(NumericStats),
    /// Booleans, or text with few distinct values.
    Categorical(CategoricalStats),
    /// Dates and timestamps.
    Temporal(TemporalStats),
    /// High-cardinality text.
    Text(TextStats),
}

/// Frequency table of a low-cardinality column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    /// Most frequent values, most frequent first; ties keep first-seen order.
    pub top_values: IndexMap<String, usize>,
}

/// Range of a temporal column, as ISO-8601 timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalStats {
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub date_range_days: Option<i64>,
}

/// Frequency table and length summary of a free-text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub top_values: IndexMap<String, usize>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub avg_length: Option<f64>,
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub declared_type: DataType,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_count: usize,
    pub unique_percentage: f64,
    pub stats: ColumnKind,
    /// First non-null values in row order, stringified.
    pub sample_values: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub detected_patterns: IndexMap<String, PatternMatch>,
}

impl ColumnProfile {
    /// Low-cardinality column, per the profiler's categorical threshold.
    pub fn is_categorical(&self) -> bool {
        matches!(self.stats, ColumnKind::Categorical(_))
    }

    pub fn numeric(&self) -> Option<&NumericStats> {
        match &self.stats {
            ColumnKind::Numeric(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn temporal(&self) -> Option<&TemporalStats> {
        match &self.stats {
            ColumnKind::Temporal(stats) => Some(stats),
            _ => None,
        }
    }

    /// Frequency table, for categorical and text columns.
    pub fn top_values(&self) -> Option<&IndexMap<String, usize>> {
        match &self.stats {
            ColumnKind::Categorical(stats) => Some(&stats.top_values),
            ColumnKind::Text(stats) => Some(&stats.top_values),
            _ => None,
        }
    }

    /// Short label for the column kind.
    pub fn kind_label(&self) -> &'static str {
        match self.stats {
            ColumnKind::Numeric(_) => "numeric",
            ColumnKind::Categorical(_) => "categorical",
            ColumnKind::Temporal(_) => "temporal",
            ColumnKind::Text(_) => "text",
        }
    }
}
