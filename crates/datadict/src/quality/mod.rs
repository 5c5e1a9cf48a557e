//! Quality assessment: completeness, duplicates, column issues and scoring.

mod assessor;
mod checks;
mod issue;
mod score;

pub use assessor::{QualityAssessor, QualityReport};
pub use checks::{NullPercentageCheck, NumericAsStringCheck, QualityCheck};
pub use issue::{IssueKind, QualityIssue, Severity};
pub use score::{QualityBand, QualityScore, ISSUE_PENALTY};
