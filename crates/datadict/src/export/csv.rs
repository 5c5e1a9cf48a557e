//! Flat CSV view of a dataset glossary.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use super::json::ensure_parent;
use crate::error::{DictError, Result};
use crate::glossary::{DatasetGlossary, GlossaryTerm};

#[derive(Debug, Serialize)]
struct GlossaryRow<'a> {
    #[serde(rename = "Technical Name")]
    technical_name: &'a str,
    #[serde(rename = "Business Name")]
    business_name: &'a str,
    #[serde(rename = "Definition")]
    definition: &'a str,
    #[serde(rename = "Data Type")]
    data_type: &'a str,
    #[serde(rename = "Owner")]
    owner: &'a str,
    #[serde(rename = "Is PII")]
    is_pii: bool,
    #[serde(rename = "Mapped")]
    mapped: bool,
}

impl<'a> From<&'a GlossaryTerm> for GlossaryRow<'a> {
    fn from(term: &'a GlossaryTerm) -> Self {
        Self {
            technical_name: &term.technical_name,
            business_name: &term.business_name,
            definition: &term.definition,
            data_type: term.data_type.as_deref().unwrap_or(""),
            owner: term.owner.as_deref().unwrap_or(""),
            is_pii: term.is_pii,
            mapped: term.is_mapped(),
        }
    }
}

fn write_rows<W: std::io::Write>(glossary: &DatasetGlossary, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for term in glossary.terms.values() {
        csv.serialize(GlossaryRow::from(term))?;
    }
    csv.flush().map_err(|e| DictError::Persistence(format!("Failed to flush CSV: {}", e)))
}

/// Glossary rows as CSV text, one row per column.
pub fn glossary_csv(glossary: &DatasetGlossary) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(glossary, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| DictError::Persistence(e.to_string()))
}

pub fn write_glossary_csv(glossary: &DatasetGlossary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| DictError::io(path, e))?;
    write_rows(glossary, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::TermDefinition;

    #[test]
    fn test_glossary_csv() {
        let def = TermDefinition::new("Email, primary")
            .with_definition("Contact")
            .with_owner("CRM")
            .with_pii(true);
        let glossary = DatasetGlossary::new(
            "d",
            vec![GlossaryTerm::exact("email", &def), GlossaryTerm::unmapped("notes")],
        );

        let text = glossary_csv(&glossary).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Technical Name,Business Name,Definition,Data Type,Owner,Is PII,Mapped"
        );
        assert_eq!(lines[1], "email,\"Email, primary\",Contact,,CRM,true,true");
        assert_eq!(lines[2], "notes,Notes,No business definition available,,,false,false");
    }
}
