//! Mapped glossary terms.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::document::TermDefinition;

/// Definition given to columns with no glossary entry.
pub const NO_DEFINITION: &str = "No business definition available";

/// Owner bucket for columns with no owner.
pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// How a column was associated with a glossary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Column name is a glossary key.
    Exact,
    /// Column name is similar enough to a key or business name.
    Fuzzy,
    /// No glossary entry; placeholder term.
    None,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Fuzzy => "fuzzy",
            MatchType::None => "none",
        }
    }
}

/// Business view of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub technical_name: String,
    pub business_name: String,
    pub definition: String,
    pub data_type: Option<String>,
    pub format: Option<String>,
    pub owner: Option<String>,
    pub examples: Vec<String>,
    pub related_terms: Vec<String>,
    pub is_pii: bool,
    pub valid_values: Vec<String>,
    pub match_type: MatchType,
    /// Glossary key a fuzzy match resolved to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_score: Option<f64>,
}

impl GlossaryTerm {
    /// Term for a column that matched `key` exactly.
    pub fn exact(technical_name: &str, definition: &TermDefinition) -> Self {
        Self::from_definition(technical_name, definition, MatchType::Exact)
    }

    /// Term for a column that fuzzily matched glossary entry `key`.
    pub fn fuzzy(technical_name: &str, key: &str, definition: &TermDefinition, score: f64) -> Self {
        let mut term = Self::from_definition(technical_name, definition, MatchType::Fuzzy);
        term.matched_term = Some(key.to_string());
        term.fuzzy_score = Some(score);
        term
    }

    /// Placeholder for a column with no glossary entry.
    pub fn unmapped(technical_name: &str) -> Self {
        Self {
            technical_name: technical_name.to_string(),
            business_name: title_case(&technical_name.replace('_', " ")),
            definition: NO_DEFINITION.to_string(),
            data_type: None,
            format: None,
            owner: None,
            examples: Vec::new(),
            related_terms: Vec::new(),
            is_pii: false,
            valid_values: Vec::new(),
            match_type: MatchType::None,
            matched_term: None,
            fuzzy_score: None,
        }
    }

    fn from_definition(technical_name: &str, def: &TermDefinition, match_type: MatchType) -> Self {
        Self {
            technical_name: technical_name.to_string(),
            business_name: def
                .business_name
                .clone()
                .unwrap_or_else(|| technical_name.to_string()),
            definition: def.definition.clone().unwrap_or_default(),
            data_type: def.data_type.clone(),
            format: def.format.clone(),
            owner: def.owner.clone().filter(|o| !o.is_empty()),
            examples: def.examples.clone(),
            related_terms: def.related_terms.clone(),
            is_pii: def.pii,
            valid_values: def.valid_values.clone(),
            match_type,
            matched_term: None,
            fuzzy_score: None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.match_type != MatchType::None
    }

    /// True when the definition is empty or the unmapped placeholder.
    pub fn missing_definition(&self) -> bool {
        self.definition.is_empty() || self.definition == NO_DEFINITION
    }

    pub fn owner_or_unassigned(&self) -> &str {
        self.owner.as_deref().unwrap_or(UNASSIGNED_OWNER)
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
///
/// A letter directly after a digit or symbol starts a new run, so
/// `"order 2nd"` becomes `"Order 2Nd"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// All mapped terms of one dataset, keyed by column name in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetGlossary {
    pub dataset_name: String,
    pub total_columns: usize,
    pub mapped_columns: usize,
    pub unmapped_columns: usize,
    pub terms: IndexMap<String, GlossaryTerm>,
}

impl DatasetGlossary {
    pub fn new(dataset_name: impl Into<String>, terms: Vec<GlossaryTerm>) -> Self {
        let total = terms.len();
        let mapped = terms.iter().filter(|t| t.is_mapped()).count();
        Self {
            dataset_name: dataset_name.into(),
            total_columns: total,
            mapped_columns: mapped,
            unmapped_columns: total - mapped,
            terms: terms
                .into_iter()
                .map(|t| (t.technical_name.clone(), t))
                .collect(),
        }
    }

    pub fn term(&self, column: &str) -> Option<&GlossaryTerm> {
        self.terms.get(column)
    }

    /// Columns flagged as PII by their glossary entry, in column order.
    pub fn pii_columns(&self) -> Vec<String> {
        self.terms
            .values()
            .filter(|t| t.is_pii)
            .map(|t| t.technical_name.clone())
            .collect()
    }

    /// Columns grouped by owner, owners in first-seen order.
    pub fn columns_by_owner(&self) -> IndexMap<String, Vec<String>> {
        let mut owners: IndexMap<String, Vec<String>> = IndexMap::new();
        for term in self.terms.values() {
            owners
                .entry(term.owner_or_unassigned().to_string())
                .or_default()
                .push(term.technical_name.clone());
        }
        owners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("customer id"), "Customer Id");
        assert_eq!(title_case("ORDER total"), "Order Total");
        assert_eq!(title_case("order 2nd"), "Order 2Nd");
        assert_eq!(title_case("x-ray"), "X-Ray");
    }

    #[test]
    fn test_unmapped_placeholder() {
        let term = GlossaryTerm::unmapped("customer_id");
        assert_eq!(term.business_name, "Customer Id");
        assert_eq!(term.definition, NO_DEFINITION);
        assert_eq!(term.match_type, MatchType::None);
        assert!(!term.is_mapped());
        assert!(term.missing_definition());
    }

    #[test]
    fn test_exact_defaults() {
        let term = GlossaryTerm::exact("zip", &TermDefinition::default());
        assert_eq!(term.business_name, "zip");
        assert_eq!(term.definition, "");
        assert!(term.missing_definition());
        assert_eq!(term.owner_or_unassigned(), UNASSIGNED_OWNER);
    }

    #[test]
    fn test_dataset_glossary_counts() {
        let owned = TermDefinition::new("Email").with_owner("Marketing").with_pii(true);
        let glossary = DatasetGlossary::new(
            "customers",
            vec![
                GlossaryTerm::exact("email", &owned),
                GlossaryTerm::unmapped("notes"),
                GlossaryTerm::fuzzy("e_mail", "email", &owned, 0.83),
            ],
        );

        assert_eq!(glossary.total_columns, 3);
        assert_eq!(glossary.mapped_columns, 2);
        assert_eq!(glossary.unmapped_columns, 1);
        assert_eq!(glossary.pii_columns(), vec!["email", "e_mail"]);

        let owners = glossary.columns_by_owner();
        let keys: Vec<&String> = owners.keys().collect();
        assert_eq!(keys, vec!["Marketing", "Unassigned"]);
        assert_eq!(owners["Marketing"], vec!["email", "e_mail"]);
    }

    #[test]
    fn test_term_serialization_skips_absent_match_fields() {
        let json = serde_json::to_value(GlossaryTerm::unmapped("a")).unwrap();
        assert_eq!(json["match_type"], "none");
        assert!(json.get("fuzzy_score").is_none());
    }
}
