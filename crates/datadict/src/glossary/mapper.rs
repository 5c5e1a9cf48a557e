//! Exact and fuzzy mapping of column names to glossary terms.

use tracing::{debug, info};

use super::document::BusinessGlossary;
use super::similarity::similarity_ratio;
use super::term::{DatasetGlossary, GlossaryTerm};
use crate::config::GlossaryConfig;
use crate::error::{DictError, Result};

/// Best fuzzy candidate for a column name.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Glossary key of the winning candidate.
    pub key: String,
    pub score: f64,
}

/// Pick the most similar candidate for `name`.
///
/// `candidates` yields `(glossary_key, comparable_text)` pairs. The name
/// is lower-cased before comparison. The first candidate reaching the
/// highest score wins; nothing matches unless that score is positive and
/// at least `threshold`.
pub fn best_fuzzy_match<K, S>(
    name: &str,
    candidates: impl IntoIterator<Item = (K, S)>,
    threshold: f64,
) -> Option<FuzzyMatch>
where
    K: AsRef<str>,
    S: AsRef<str>,
{
    let name = name.to_lowercase();
    let mut best: Option<FuzzyMatch> = None;
    let mut best_score = 0.0;

    for (key, text) in candidates {
        let score = similarity_ratio(&name, text.as_ref());
        if score > best_score && score >= threshold {
            best_score = score;
            best = Some(FuzzyMatch {
                key: key.as_ref().to_string(),
                score,
            });
        }
    }

    best
}

/// Maps technical column names onto an immutable business glossary.
#[derive(Debug, Clone, Default)]
pub struct TermMapper {
    glossary: BusinessGlossary,
    config: GlossaryConfig,
}

impl TermMapper {
    pub fn new(glossary: BusinessGlossary, config: GlossaryConfig) -> Self {
        Self { glossary, config }
    }

    pub fn glossary(&self) -> &BusinessGlossary {
        &self.glossary
    }

    pub fn config(&self) -> &GlossaryConfig {
        &self.config
    }

    /// Map one column name: exact key, then fuzzy match, then placeholder.
    pub fn map_column(&self, column: &str) -> GlossaryTerm {
        if let Some(definition) = self.glossary.get(column) {
            return GlossaryTerm::exact(column, definition);
        }

        if self.config.auto_mapping {
            let found = best_fuzzy_match(column, self.glossary.candidates(), self.config.similarity_threshold);
            if let Some(FuzzyMatch { key, score }) = found {
                if let Some(definition) = self.glossary.get(&key) {
                    debug!(column, matched = %key, score, "Fuzzy glossary match");
                    return GlossaryTerm::fuzzy(column, &key, definition, score);
                }
            }
        }

        GlossaryTerm::unmapped(column)
    }

    /// Map every column, preserving order.
    pub fn map_columns<S: AsRef<str>>(&self, columns: &[S]) -> Vec<GlossaryTerm> {
        columns.iter().map(|c| self.map_column(c.as_ref())).collect()
    }

    /// Map a dataset's columns. Fails when there are no columns.
    pub fn map_dataset<S: AsRef<str>>(&self, dataset_name: &str, columns: &[S]) -> Result<DatasetGlossary> {
        if columns.is_empty() {
            return Err(DictError::InvalidInput(format!(
                "dataset '{}' has no columns to map",
                dataset_name
            )));
        }

        info!(dataset = dataset_name, columns = columns.len(), "Mapping columns");
        let glossary = DatasetGlossary::new(dataset_name, self.map_columns(columns));
        info!(
            dataset = dataset_name,
            mapped = glossary.mapped_columns,
            unmapped = glossary.unmapped_columns,
            "Mapped columns"
        );
        Ok(glossary)
    }
}
