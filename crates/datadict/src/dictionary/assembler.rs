//! Joins profile, metadata and glossary into a dictionary.

use chrono::Utc;
use tracing::info;

use super::model::{ColumnEntry, DataDictionary, Overview, QualitySection, TypeInfo, UsageNotes};
use crate::config::DictionaryConfig;
use crate::error::{DictError, Result};
use crate::glossary::{DatasetGlossary, GlossaryTerm};
use crate::metadata::{SchemaEntry, TechnicalMetadata};
use crate::profile::{with_thousands, ColumnProfile, DatasetProfile};

/// Notes attached to every dictionary.
pub const GOVERNANCE_NOTES: [&str; 3] = [
    "Review data quality issues before using in production",
    "Verify PII handling complies with privacy policies",
    "Contact data owner for questions about business logic",
];

#[derive(Debug, Clone, Default)]
pub struct DictionaryAssembler {
    config: DictionaryConfig,
}

impl DictionaryAssembler {
    pub fn new(config: DictionaryConfig) -> Self {
        Self { config }
    }

    /// Build the dictionary for one dataset.
    ///
    /// Columns follow the metadata schema. Every schema column must have a
    /// profile; a column the glossary does not cover gets an unmapped term.
    pub fn assemble(
        &self,
        profile: &DatasetProfile,
        metadata: &TechnicalMetadata,
        glossary: &DatasetGlossary,
    ) -> Result<DataDictionary> {
        let dataset = profile.dataset_name.as_str();
        info!(dataset, "Generating data dictionary");

        let columns = metadata
            .schema
            .iter()
            .map(|entry| {
                let column_profile = profile.column(&entry.column_name).ok_or_else(|| {
                    DictError::InvalidInput(format!(
                        "column '{}' of dataset '{}' has no profile",
                        entry.column_name, dataset
                    ))
                })?;
                let term = glossary
                    .term(&entry.column_name)
                    .cloned()
                    .unwrap_or_else(|| GlossaryTerm::unmapped(&entry.column_name));
                Ok(self.column_entry(entry, column_profile, term))
            })
            .collect::<Result<Vec<_>>>()?;

        let basic = &profile.basic_info;
        let overview = Overview {
            description: format!(
                "Dataset containing {} records across {} fields",
                with_thousands(basic.row_count),
                basic.column_count
            ),
            record_count: basic.row_count,
            field_count: basic.column_count,
            size_bytes: basic.estimated_size_bytes,
            size_mb: format!("{:.2} MB", basic.size_mb()),
            refresh_frequency: self.config.refresh_frequency.clone(),
        };

        let quality = &profile.quality;
        let data_quality = QualitySection {
            overall_completeness: quality.overall_completeness,
            duplicate_records: quality.duplicate_rows_count,
            quality_issues: quality.quality_issues.clone(),
            quality_score: quality.score(),
        };

        let usage_notes = UsageNotes {
            primary_keys: columns
                .iter()
                .filter(|c| c.is_unique && !c.nullable)
                .map(|c| c.technical_name.clone())
                .collect(),
            notes: GOVERNANCE_NOTES.iter().map(|n| n.to_string()).collect(),
        };

        Ok(DataDictionary {
            dataset_name: dataset.to_string(),
            generated_at: Utc::now(),
            overview,
            columns,
            data_quality,
            usage_notes,
        })
    }

    fn column_entry(&self, entry: &SchemaEntry, profile: &ColumnProfile, term: GlossaryTerm) -> ColumnEntry {
        let mut profile = profile.clone();
        if !self.config.include_samples {
            profile.sample_values.clear();
        }

        ColumnEntry {
            position: entry.position,
            technical_name: entry.column_name.clone(),
            business_name: term.business_name.clone(),
            description: term.definition.clone(),
            data_type: TypeInfo {
                native: entry.native_type,
                sql: entry.sql_type.clone(),
                family: entry.type_family.clone(),
            },
            nullable: entry.nullable,
            is_unique: entry.is_unique,
            owner: term.owner.clone(),
            is_pii: term.is_pii,
            sensitivity: term.is_pii.then(|| "HIGH".to_string()),
            profile,
            term,
        }
    }
}
