//! Data source abstraction and metadata.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::value::{DataType, Value};
use crate::error::{DictError, Result};

/// Metadata about the source data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
}

impl SourceMetadata {
    pub fn new(path: PathBuf, hash: String, size_bytes: u64, format: String) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
        }
    }

    /// File name without extension, used as the default dataset name.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.clone())
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column, deriving its declared type from the values.
    ///
    /// All integers give `Integer`, any mix of integers and floats gives
    /// `Float`, a column with no non-null value is `Float`, and any
    /// other mixture is `Text`.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let data_type = infer_declared_type(&values);
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    /// Create a column with an explicit declared type.
    pub fn with_type(name: impl Into<String>, data_type: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Non-null values in row order.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Number of distinct non-null values.
    pub fn distinct_count(&self) -> usize {
        self.non_null().map(Value::key).collect::<HashSet<_>>().len()
    }
}

fn infer_declared_type(values: &[Value]) -> DataType {
    let mut seen: Option<DataType> = None;
    for ty in values.iter().filter_map(Value::data_type) {
        seen = match (seen, ty) {
            (None, t) => Some(t),
            (Some(a), b) if a == b => Some(a),
            (Some(DataType::Integer), DataType::Float) | (Some(DataType::Float), DataType::Integer) => {
                Some(DataType::Float)
            }
            _ => return DataType::Text,
        };
    }
    seen.unwrap_or(DataType::Float)
}

/// An in-memory table of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl DataTable {
    /// Create a table, rejecting ragged columns and duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);

        let mut names = HashSet::new();
        for column in &columns {
            if column.len() != row_count {
                return Err(DictError::InvalidInput(format!(
                    "column '{}' has {} values, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }
            if !names.insert(column.name.as_str()) {
                return Err(DictError::InvalidInput(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns true if the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declared order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.columns.get(col).and_then(|c| c.values.get(row))
    }

    /// Iterate over the cells of one row.
    pub fn row(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.columns.iter().filter_map(move |c| c.values.get(index))
    }

    /// Total null cells across all columns.
    pub fn null_cells(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// Number of rows identical to an earlier row (first occurrence not counted).
    pub fn duplicate_row_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.row_count);
        (0..self.row_count)
            .filter(|&i| !seen.insert(self.row(i).map(Value::key).collect::<Vec<_>>()))
            .count()
    }

    /// Deterministic estimate of the in-memory footprint in bytes.
    ///
    /// Fixed-width cells count 8 bytes, booleans 1, and text cells a
    /// 57-byte object overhead plus their UTF-8 length.
    pub fn estimated_size_bytes(&self) -> u64 {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter())
            .map(|v| match v {
                Value::Bool(_) => 1,
                Value::Text(s) => 57 + s.len() as u64,
                _ => 8,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&v| Value::Int(v)).collect()
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = DataTable::new(vec![
            Column::new("a", ints(&[1, 2, 3])),
            Column::new("b", ints(&[1, 2])),
        ])
        .unwrap_err();
        assert!(matches!(err, DictError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = DataTable::new(vec![
            Column::new("a", ints(&[1])),
            Column::new("a", ints(&[2])),
        ])
        .unwrap_err();
        assert!(matches!(err, DictError::InvalidInput(_)));
    }

    #[test]
    fn test_declared_type_inference() {
        assert_eq!(Column::new("x", ints(&[1, 2])).data_type, DataType::Integer);
        assert_eq!(
            Column::new("x", vec![Value::Int(1), Value::Float(2.5)]).data_type,
            DataType::Float
        );
        assert_eq!(
            Column::new("x", vec![Value::Null, Value::Null]).data_type,
            DataType::Float
        );
        assert_eq!(
            Column::new("x", vec![Value::Int(1), Value::from("a")]).data_type,
            DataType::Text
        );
    }

    #[test]
    fn test_duplicate_rows() {
        let table = DataTable::new(vec![
            Column::new("a", ints(&[1, 1, 2, 1])),
            Column::new("b", vec!["x".into(), "x".into(), "x".into(), Value::Null]),
        ])
        .unwrap();
        assert_eq!(table.duplicate_row_count(), 1);
    }

    #[test]
    fn test_null_rows_compare_equal() {
        let table = DataTable::new(vec![Column::new(
            "a",
            vec![Value::Null, Value::Float(f64::NAN), Value::Null],
        )])
        .unwrap();
        assert_eq!(table.duplicate_row_count(), 2);
        assert_eq!(table.null_cells(), 3);
    }

    #[test]
    fn test_source_stem() {
        let meta = SourceMetadata::new(
            PathBuf::from("/data/customers.csv"),
            "sha256:00".into(),
            10,
            "csv".into(),
        );
        assert_eq!(meta.file, "customers.csv");
        assert_eq!(meta.stem(), "customers");
    }
}
