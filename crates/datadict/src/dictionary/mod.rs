//! Dictionary assembly: a pure join of profile, metadata and glossary.

mod assembler;
mod model;

pub use assembler::{DictionaryAssembler, GOVERNANCE_NOTES};
pub use model::{ColumnEntry, DataDictionary, Overview, QualitySection, TypeInfo, UsageNotes};
