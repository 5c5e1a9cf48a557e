//! Data dictionary records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::glossary::GlossaryTerm;
use crate::input::DataType;
use crate::profile::ColumnProfile;
use crate::quality::{QualityIssue, QualityScore};

/// Dataset-level summary shown at the top of a dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub description: String,
    pub record_count: usize,
    pub field_count: usize,
    pub size_bytes: u64,
    /// Estimated size formatted like `"0.02 MB"`.
    pub size_mb: String,
    pub refresh_frequency: String,
}

/// Native, SQL and family view of a column's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub native: DataType,
    pub sql: String,
    pub family: String,
}

/// One column: its schema facts joined with its profile and glossary term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub position: usize,
    pub technical_name: String,
    pub business_name: String,
    pub description: String,
    pub data_type: TypeInfo,
    pub nullable: bool,
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub is_pii: bool,
    /// `"HIGH"` for PII columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<String>,
    pub profile: ColumnProfile,
    pub term: GlossaryTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySection {
    pub overall_completeness: f64,
    pub duplicate_records: usize,
    pub quality_issues: Vec<QualityIssue>,
    pub quality_score: QualityScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageNotes {
    /// Unique, non-nullable columns.
    pub primary_keys: Vec<String>,
    pub notes: Vec<String>,
}

/// Complete data dictionary for one dataset.
///
/// Everything except `generated_at` is derived from the inputs, so two
/// dictionaries built from the same inputs compare equal once that field
/// is aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDictionary {
    pub dataset_name: String,
    pub generated_at: DateTime<Utc>,
    pub overview: Overview,
    /// Entries in table column order.
    pub columns: Vec<ColumnEntry>,
    pub data_quality: QualitySection,
    pub usage_notes: UsageNotes,
}

impl DataDictionary {
    pub fn column(&self, name: &str) -> Option<&ColumnEntry> {
        self.columns.iter().find(|c| c.technical_name == name)
    }

    pub fn pii_columns(&self) -> impl Iterator<Item = &ColumnEntry> {
        self.columns.iter().filter(|c| c.is_pii)
    }
}
