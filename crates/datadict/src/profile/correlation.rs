//! Pearson correlation between numeric columns.

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// A pair of columns whose correlation magnitude exceeds the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    pub column_1: String,
    pub column_2: String,
    pub correlation: f64,
}

/// Correlation matrix of the numeric columns of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Numeric columns, in table order.
    pub columns: Vec<String>,
    /// `matrix[i][j]` is the correlation of `columns[i]` and `columns[j]`;
    /// `None` where it is undefined (fewer than two complete rows or zero variance).
    pub matrix: Vec<Vec<Option<f64>>>,
    pub strong_correlations: Vec<StrongCorrelation>,
}

impl CorrelationReport {
    /// Correlate every pair of numeric columns.
    ///
    /// Returns `None` when the table has fewer than two numeric columns.
    pub fn compute(table: &DataTable, threshold: f64) -> Option<Self> {
        let numeric: Vec<(&str, Vec<Option<f64>>)> = table
            .columns()
            .iter()
            .filter(|c| c.data_type.is_numeric())
            .map(|c| (c.name.as_str(), c.values.iter().map(|v| v.as_f64()).collect()))
            .collect();

        if numeric.len() < 2 {
            return None;
        }

        let n = numeric.len();
        let mut matrix = vec![vec![None; n]; n];
        let mut strong = Vec::new();

        for i in 0..n {
            matrix[i][i] = pearson(&numeric[i].1, &numeric[i].1).map(|_| 1.0);
            for j in (i + 1)..n {
                let r = pearson(&numeric[i].1, &numeric[j].1);
                matrix[i][j] = r;
                matrix[j][i] = r;

                if let Some(r) = r.filter(|r| r.abs() > threshold) {
                    strong.push(StrongCorrelation {
                        column_1: numeric[i].0.to_string(),
                        column_2: numeric[j].0.to_string(),
                        correlation: r,
                    });
                }
            }
        }

        Some(Self {
            columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
            matrix,
            strong_correlations: strong,
        })
    }

    /// Look up the correlation of two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.matrix[i][j]
    }
}

/// Pearson correlation over rows where both values are present.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, Value};

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_correlation() {
        let r = pearson(&some(&[1.0, 2.0, 3.0]), &some(&[2.0, 4.0, 6.0])).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let r = pearson(&some(&[1.0, 2.0, 3.0]), &some(&[3.0, 2.0, 1.0])).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_undefined() {
        assert_eq!(pearson(&some(&[1.0, 1.0, 1.0]), &some(&[1.0, 2.0, 3.0])), None);
    }

    #[test]
    fn test_pairwise_complete() {
        let xs = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let ys = vec![Some(10.0), Some(99.0), Some(20.0), Some(30.0)];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_strong_pairs() {
        let table = DataTable::new(vec![
            Column::new("x", [1, 2, 3, 4].iter().map(|&v| Value::Int(v)).collect()),
            Column::new("label", ["a", "b", "c", "d"].iter().map(|&v| Value::from(v)).collect()),
            Column::new("y", [2.0, 4.1, 5.9, 8.0].iter().map(|&v| Value::Float(v)).collect()),
            Column::new("z", [5, 1, 4, 2].iter().map(|&v| Value::Int(v)).collect()),
        ])
        .unwrap();

        let report = CorrelationReport::compute(&table, 0.7).unwrap();
        assert_eq!(report.columns, vec!["x", "y", "z"]);
        assert_eq!(report.strong_correlations.len(), 1);
        assert_eq!(report.strong_correlations[0].column_1, "x");
        assert_eq!(report.strong_correlations[0].column_2, "y");
        assert!(report.get("x", "y").unwrap() > 0.99);
        assert_eq!(report.get("x", "x"), Some(1.0));
    }

    #[test]
    fn test_single_numeric_column() {
        let table = DataTable::new(vec![Column::new("x", vec![Value::Int(1), Value::Int(2)])]).unwrap();
        assert!(CorrelationReport::compute(&table, 0.7).is_none());
    }
}
