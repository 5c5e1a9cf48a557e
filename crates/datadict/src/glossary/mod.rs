//! Business glossary: term documents, similarity matching and mapping.
//!
//! A [`TermMapper`] holds one read-only [`BusinessGlossary`] and maps
//! column names to [`GlossaryTerm`]s: exact key first, then (if enabled)
//! the best fuzzy candidate above the similarity threshold, otherwise an
//! unmapped placeholder.

mod document;
mod mapper;
mod report;
mod similarity;
mod term;
mod validation;

pub use document::{BusinessGlossary, TermDefinition};
pub use mapper::{best_fuzzy_match, FuzzyMatch, TermMapper};
pub use similarity::similarity_ratio;
pub use term::{title_case, DatasetGlossary, GlossaryTerm, MatchType, NO_DEFINITION, UNASSIGNED_OWNER};
pub use validation::{MappingValidation, ValidationIssue, ValidationIssueKind, MAX_LISTED_COLUMNS};
