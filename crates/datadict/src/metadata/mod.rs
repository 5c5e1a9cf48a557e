//! Technical metadata: schema with SQL types, statistics, flags and lineage.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DictError, Result};
use crate::input::{Column, DataTable, DataType, Value};
use crate::profile::NumericStats;

/// Schema facts about one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub column_name: String,
    /// 1-based position in the table.
    pub position: usize,
    pub native_type: DataType,
    /// numeric, datetime, boolean or string.
    pub type_family: String,
    pub sql_type: String,
    pub nullable: bool,
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Non-null values.
    pub count: usize,
    pub null_count: usize,
    pub unique_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub row_count: usize,
    pub column_count: usize,
    pub total_cells: usize,
    pub estimated_size_bytes: u64,
    pub column_statistics: IndexMap<String, ColumnStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalFlags {
    pub has_duplicates: bool,
    /// `"ascending by <col>"` / `"descending by <col>"` for the first
    /// monotonic column without nulls.
    pub is_sorted: Option<String>,
    pub encoding: String,
}

/// Where a dataset was loaded from, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceInfo {
    pub system: Option<String>,
    pub table: Option<String>,
    pub load_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamSource {
    pub source_system: String,
    pub source_table: String,
    pub load_timestamp: DateTime<Utc>,
    pub load_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    pub dataset: String,
    pub upstream_sources: Vec<UpstreamSource>,
    pub downstream_targets: Vec<String>,
    pub transformations: Vec<String>,
}

/// Technical description of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalMetadata {
    pub dataset_name: String,
    pub extracted_at: DateTime<Utc>,
    pub schema: Vec<SchemaEntry>,
    pub statistics: DatasetStatistics,
    pub technical: TechnicalFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_info: Option<SourceInfo>,
    pub lineage: Lineage,
}

impl TechnicalMetadata {
    /// Extract metadata from a table. Fails on a table with no rows or columns.
    pub fn extract(table: &DataTable, dataset_name: &str, source: Option<&SourceInfo>) -> Result<Self> {
        if table.is_empty() {
            return Err(DictError::InvalidInput(format!(
                "cannot extract metadata from empty dataset '{}'",
                dataset_name
            )));
        }
        info!(dataset = dataset_name, "Extracting metadata");

        let extracted_at = Utc::now();
        let rows = table.row_count();

        let schema = table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, column)| schema_entry(column, idx + 1, rows))
            .collect();

        let column_statistics = table
            .columns()
            .iter()
            .map(|c| {
                let null_count = c.null_count();
                let stats = ColumnStatistics {
                    count: rows - null_count,
                    null_count,
                    unique_count: c.distinct_count(),
                    numeric: c
                        .data_type
                        .is_numeric()
                        .then(|| NumericStats::from_values(c.non_null().filter_map(Value::as_f64))),
                };
                (c.name.clone(), stats)
            })
            .collect();

        let statistics = DatasetStatistics {
            row_count: rows,
            column_count: table.column_count(),
            total_cells: rows * table.column_count(),
            estimated_size_bytes: table.estimated_size_bytes(),
            column_statistics,
        };

        let technical = TechnicalFlags {
            has_duplicates: table.duplicate_row_count() > 0,
            is_sorted: sort_order(table),
            encoding: "UTF-8".to_string(),
        };

        let upstream_sources = source
            .map(|s| UpstreamSource {
                source_system: s.system.clone().unwrap_or_else(|| "unknown".to_string()),
                source_table: s.table.clone().unwrap_or_else(|| dataset_name.to_string()),
                load_timestamp: extracted_at,
                load_type: s.load_type.clone().unwrap_or_else(|| "full".to_string()),
            })
            .into_iter()
            .collect();

        Ok(Self {
            dataset_name: dataset_name.to_string(),
            extracted_at,
            schema,
            statistics,
            technical,
            source_info: source.cloned(),
            lineage: Lineage {
                dataset: dataset_name.to_string(),
                upstream_sources,
                downstream_targets: Vec::new(),
                transformations: Vec::new(),
            },
        })
    }

    pub fn entry(&self, column: &str) -> Option<&SchemaEntry> {
        self.schema.iter().find(|e| e.column_name == column)
    }

    /// `CREATE TABLE` statement for the schema.
    pub fn ddl(&self, table_name: &str) -> String {
        let columns: Vec<String> = self
            .schema
            .iter()
            .map(|e| {
                let not_null = if e.nullable { "" } else { " NOT NULL" };
                format!("  {} {}{}", e.column_name, e.sql_type, not_null)
            })
            .collect();

        format!("CREATE TABLE {} (\n{}\n);", table_name, columns.join(",\n"))
    }
}

fn schema_entry(column: &Column, position: usize, rows: usize) -> SchemaEntry {
    let distinct_with_nulls = column.values.iter().map(Value::key).collect::<HashSet<_>>().len();

    let max_length = (column.data_type == DataType::Text)
        .then(|| column.non_null().map(|v| v.to_string().chars().count()).max())
        .flatten()
        .filter(|&len| len > 0);

    SchemaEntry {
        column_name: column.name.clone(),
        position,
        native_type: column.data_type,
        type_family: column.data_type.family().to_string(),
        sql_type: sql_type(column, max_length),
        nullable: column.null_count() > 0,
        is_unique: distinct_with_nulls == rows,
        max_length,
    }
}

/// SQL column type for a column.
///
/// Integers are sized by their maximum value; text is sized by its longest
/// value, falling back to `VARCHAR(255)`.
pub fn sql_type(column: &Column, max_length: Option<usize>) -> String {
    match column.data_type {
        DataType::Integer => {
            let max = column.non_null().filter_map(Value::as_f64).reduce(f64::max);
            match max {
                Some(m) if m <= 32767.0 => "SMALLINT",
                Some(m) if m <= 2147483647.0 => "INTEGER",
                _ => "BIGINT",
            }
            .to_string()
        }
        DataType::Float => "DECIMAL(18,2)".to_string(),
        DataType::Boolean => "BOOLEAN".to_string(),
        DataType::DateTime => "TIMESTAMP".to_string(),
        DataType::Text => match max_length {
            Some(len) => format!("VARCHAR({})", len),
            None => "VARCHAR(255)".to_string(),
        },
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// Direction in which a column's values never decrease (or never increase).
fn monotonic(column: &Column) -> Option<&'static str> {
    if column.values.iter().any(Value::is_null) {
        return None;
    }

    let mut ascending = true;
    let mut descending = true;
    for pair in column.values.windows(2) {
        match compare(&pair[0], &pair[1])? {
            Ordering::Less => descending = false,
            Ordering::Greater => ascending = false,
            Ordering::Equal => {}
        }
    }

    if ascending {
        Some("ascending")
    } else if descending {
        Some("descending")
    } else {
        None
    }
}

fn sort_order(table: &DataTable) -> Option<String> {
    table
        .columns()
        .iter()
        .find_map(|c| monotonic(c).map(|dir| format!("{} by {}", dir, c.name)))
}
