//! Run configuration, loaded from YAML.
//!
//! Every field has a default, so an empty document (or no document at all)
//! yields a usable configuration:
//!
//! ```
//! use datadict::Config;
//!
//! let config = Config::from_yaml_str("glossary:\n  similarity_threshold: 0.9\n").unwrap();
//! assert_eq!(config.glossary.similarity_threshold, 0.9);
//! assert!(config.glossary.auto_mapping);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DictError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Column profiling and quality settings.
    pub profiling: ProfilingConfig,
    /// Business glossary mapping settings.
    pub glossary: GlossaryConfig,
    /// Dictionary assembly settings.
    pub dictionary: DictionaryConfig,
}

/// Thresholds that turn statistics into quality issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Null percentage above which a column gets a `high_null_percentage` issue.
    pub max_null_percentage: f64,
    /// Null percentage above which that issue is rated high severity.
    pub high_null_percentage: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_null_percentage: 10.0,
            high_null_percentage: 50.0,
        }
    }
}

/// Profiling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    pub quality_thresholds: QualityThresholds,
    /// A text column with fewer unique values than this is categorical.
    pub categorical_threshold: usize,
    /// Size of the value frequency table.
    pub top_values: usize,
    /// Number of sample values kept per column.
    pub sample_values: usize,
    /// Number of non-null values scanned by the pattern detector.
    pub pattern_sample_size: usize,
    /// Whether to compute correlations between numeric columns.
    pub correlation_analysis: bool,
    /// Absolute correlation above which a pair is reported as strong.
    pub correlation_threshold: f64,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            quality_thresholds: QualityThresholds::default(),
            categorical_threshold: 50,
            top_values: 10,
            sample_values: 5,
            pattern_sample_size: 100,
            correlation_analysis: true,
            correlation_threshold: 0.7,
        }
    }
}

/// Glossary mapping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryConfig {
    /// Try fuzzy matching when a column has no exact glossary key.
    pub auto_mapping: bool,
    /// Minimum similarity ratio for a fuzzy match (0.0-1.0).
    pub similarity_threshold: f64,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            auto_mapping: true,
            similarity_threshold: 0.8,
        }
    }
}

/// Dictionary assembly settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Include sample values in column entries.
    pub include_samples: bool,
    /// Refresh frequency shown in the overview.
    pub refresh_frequency: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            include_samples: true,
            refresh_frequency: "Daily".to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from YAML text and validate it.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str::<Option<Config>>(text)?.unwrap_or_default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DictError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Check that thresholds are in range.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.glossary.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DictError::Config(format!(
                "glossary.similarity_threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        let thresholds = &self.profiling.quality_thresholds;
        for (name, value) in [
            ("max_null_percentage", thresholds.max_null_percentage),
            ("high_null_percentage", thresholds.high_null_percentage),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(DictError::Config(format!(
                    "profiling.quality_thresholds.{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.profiling.correlation_threshold) {
            return Err(DictError::Config(format!(
                "profiling.correlation_threshold must be within [0, 1], got {}",
                self.profiling.correlation_threshold
            )));
        }
        if self.profiling.top_values == 0 {
            return Err(DictError::Config("profiling.top_values must be positive".to_string()));
        }
        if self.profiling.pattern_sample_size == 0 {
            return Err(DictError::Config(
                "profiling.pattern_sample_size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
