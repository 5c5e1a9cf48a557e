//! Single-number quality score.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Points deducted per quality issue.
pub const ISSUE_PENALTY: f64 = 5.0;

/// Qualitative band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityBand {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl QualityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            QualityBand::Excellent
        } else if score >= 75.0 {
            QualityBand::Good
        } else if score >= 60.0 {
            QualityBand::Fair
        } else {
            QualityBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityBand::Excellent => "Excellent",
            QualityBand::Good => "Good",
            QualityBand::Fair => "Fair",
            QualityBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Completeness penalized by the number of issues, clamped to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub score: f64,
    pub band: QualityBand,
}

impl QualityScore {
    pub fn compute(completeness: f64, issue_count: usize) -> Self {
        let score = (completeness - ISSUE_PENALTY * issue_count as f64).clamp(0.0, 100.0);
        Self {
            score,
            band: QualityBand::from_score(score),
        }
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}% ({})", self.score, self.band.label())
    }
}
