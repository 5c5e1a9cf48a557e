//! Mapping coverage and completeness checks.

use serde::{Deserialize, Serialize};

use super::term::DatasetGlossary;
use crate::profile::percentage;

/// Maximum columns listed per validation issue.
pub const MAX_LISTED_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssueKind {
    MissingDefinitions,
    MissingOwners,
}

/// A group of columns sharing one glossary gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: ValidationIssueKind,
    /// Number of affected columns.
    pub count: usize,
    /// First affected columns, at most [`MAX_LISTED_COLUMNS`].
    pub columns: Vec<String>,
}

/// How well a dataset's columns are covered by the glossary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingValidation {
    pub total_columns: usize,
    pub mapped_columns: usize,
    /// Mapped columns as a percentage of all columns.
    pub mapping_coverage: f64,
    pub columns_missing_definitions: usize,
    pub columns_missing_owners: usize,
    /// Same ratio as `mapping_coverage`, on a 0-100 scale.
    pub quality_score: f64,
    pub issues: Vec<ValidationIssue>,
}

impl MappingValidation {
    pub fn compute(glossary: &DatasetGlossary) -> Self {
        let total = glossary.total_columns;
        let mapped = glossary.mapped_columns;

        let missing_definitions: Vec<&str> = glossary
            .terms
            .values()
            .filter(|t| t.missing_definition())
            .map(|t| t.technical_name.as_str())
            .collect();

        let missing_owners: Vec<&str> = glossary
            .terms
            .values()
            .filter(|t| t.owner.is_none())
            .map(|t| t.technical_name.as_str())
            .collect();

        let mut issues = Vec::new();
        for (kind, columns) in [
            (ValidationIssueKind::MissingDefinitions, &missing_definitions),
            (ValidationIssueKind::MissingOwners, &missing_owners),
        ] {
            if !columns.is_empty() {
                issues.push(ValidationIssue {
                    kind,
                    count: columns.len(),
                    columns: columns
                        .iter()
                        .take(MAX_LISTED_COLUMNS)
                        .map(|c| c.to_string())
                        .collect(),
                });
            }
        }

        let coverage = percentage(mapped, total);
        Self {
            total_columns: total,
            mapped_columns: mapped,
            mapping_coverage: coverage,
            columns_missing_definitions: missing_definitions.len(),
            columns_missing_owners: missing_owners.len(),
            quality_score: coverage,
            issues,
        }
    }

    /// Coverage formatted like `"66.7%"`.
    pub fn coverage_label(&self) -> String {
        format!("{:.1}%", self.mapping_coverage)
    }
}
