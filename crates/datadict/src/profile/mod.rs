//! Column profiling: statistics, value patterns and correlations.
//!
//! A [`Profiler`] turns a [`DataTable`](crate::input::DataTable) into a
//! [`DatasetProfile`]: one [`ColumnProfile`] per column, a
//! [`QualityReport`](crate::quality::QualityReport) and, when enabled, a
//! [`CorrelationReport`] over the numeric columns.

mod column;
mod correlation;
mod patterns;
mod profiler;
mod stats;

pub use column::{CategoricalStats, ColumnKind, ColumnProfile, TemporalStats, TextStats};
pub use correlation::{pearson, CorrelationReport, StrongCorrelation};
pub use patterns::{detect_patterns, PatternDetector, PatternMatch};
pub use profiler::{BasicInfo, DatasetProfile, Profiler};
pub use stats::{median, percentage, with_thousands, NumericStats, RunningStats};
