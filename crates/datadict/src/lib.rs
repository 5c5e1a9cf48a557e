//! Datadict: profiling, business glossary mapping and data dictionaries
//! for tabular datasets.
//!
//! A run profiles every column of a table, assesses its quality, maps each
//! column name onto a business glossary and joins the results into one
//! data dictionary per dataset.
//!
//! # Core Principles
//!
//! - **Read-only**: Input tables are never modified
//! - **Deterministic**: Identical inputs give identical results, apart from timestamps
//! - **Annotated, not guessed**: PII and ownership come from the glossary, never from data values
//!
//! # Example
//!
//! ```no_run
//! use datadict::{BusinessGlossary, Config, Session};
//! use datadict::export::ExportFormat;
//!
//! let config = Config::load("config.yaml").unwrap();
//! let glossary = BusinessGlossary::load("glossary.yaml").unwrap();
//! let mut session = Session::new(config, glossary);
//!
//! let (_, output) = session.run_file("customers.csv", None, None).unwrap();
//! println!("Quality: {}", output.dictionary.data_quality.quality_score);
//!
//! session.export("customers", "out", &ExportFormat::ALL).unwrap();
//! ```

pub mod config;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod glossary;
pub mod input;
pub mod metadata;
pub mod profile;
pub mod quality;

mod session;

pub use config::Config;
pub use dictionary::{DataDictionary, DictionaryAssembler};
pub use error::{DictError, Result};
pub use glossary::{BusinessGlossary, DatasetGlossary, GlossaryTerm, MatchType, TermMapper};
pub use input::{DataTable, SourceMetadata};
pub use metadata::{SourceInfo, TechnicalMetadata};
pub use profile::{DatasetProfile, Profiler};
pub use quality::{QualityReport, QualityScore};
pub use session::{RunOutput, Session};
