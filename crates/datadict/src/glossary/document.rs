//! Business glossary document, as loaded from YAML.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::error::{DictError, Result};

/// Attributes of one glossary entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermDefinition {
    #[serde(deserialize_with = "scalar_opt")]
    pub business_name: Option<String>,
    #[serde(deserialize_with = "scalar_opt")]
    pub definition: Option<String>,
    #[serde(deserialize_with = "scalar_opt")]
    pub data_type: Option<String>,
    #[serde(deserialize_with = "scalar_opt")]
    pub format: Option<String>,
    #[serde(deserialize_with = "scalar_opt")]
    pub owner: Option<String>,
    #[serde(deserialize_with = "scalar_list")]
    pub examples: Vec<String>,
    #[serde(deserialize_with = "scalar_list")]
    pub related_terms: Vec<String>,
    #[serde(deserialize_with = "bool_or_null")]
    pub pii: bool,
    #[serde(deserialize_with = "scalar_list")]
    pub valid_values: Vec<String>,
}

impl TermDefinition {
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: Some(business_name.into()),
            ..Default::default()
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_pii(mut self, pii: bool) -> Self {
        self.pii = pii;
        self
    }

    /// Business name lower-cased with spaces as underscores, for comparison
    /// against technical names.
    pub fn comparable_name(&self) -> Option<String> {
        self.business_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| n.to_lowercase().replace(' ', "_"))
    }
}

/// Read-only map of technical name to term attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessGlossary {
    #[serde(default)]
    pub terms: IndexMap<String, TermDefinition>,
}

impl BusinessGlossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term, replacing any existing entry with the same key.
    pub fn with_term(mut self, key: impl Into<String>, term: TermDefinition) -> Self {
        self.terms.insert(key.into(), term);
        self
    }

    /// Parse a glossary document.
    ///
    /// A document without a `terms` mapping yields an empty glossary; a
    /// malformed term entry is an error.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let doc: serde_yaml::Value = if text.trim().is_empty() {
            serde_yaml::Value::Null
        } else {
            serde_yaml::from_str(text)?
        };

        let terms = match doc.get("terms") {
            Some(terms) if !terms.is_null() => terms.clone(),
            _ => {
                warn!("Glossary document has no 'terms' section; all columns will be unmapped");
                return Ok(Self::default());
            }
        };

        let terms: IndexMap<String, TermDefinition> = serde_yaml::from_value(terms)?;
        info!(terms = terms.len(), "Loaded business glossary");
        Ok(Self { terms })
    }

    /// Load a glossary document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DictError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    pub fn get(&self, key: &str) -> Option<&TermDefinition> {
        self.terms.get(key)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Fuzzy-match candidates in glossary order: for each term its lower-cased
    /// key, then its comparable business name if it has one.
    pub fn candidates(&self) -> impl Iterator<Item = (&str, String)> {
        self.terms.iter().flat_map(|(key, term)| {
            std::iter::once((key.as_str(), key.to_lowercase()))
                .chain(term.comparable_name().map(|name| (key.as_str(), name)))
        })
    }
}

// =============================================================================
// LENIENT SCALAR FIELDS
// =============================================================================
// Glossary authors write numbers and booleans where strings are expected
// (`examples: [1001, 1002]`); those are kept as their text form.

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{:.1}", x),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

fn scalar_opt<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| s.to_string()))
}

fn scalar_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    let items = Option::<Vec<Option<Scalar>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().flatten().map(|s| s.to_string()).collect())
}

fn bool_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
