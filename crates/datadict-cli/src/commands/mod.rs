//! CLI command implementations.

pub mod ddl;
pub mod glossary;
pub mod run;
pub mod serve;

use std::path::Path;

use colored::Colorize;
use datadict::{BusinessGlossary, Config, Session};

/// Build a session from optional config and glossary files.
///
/// A missing glossary is allowed; every column then comes out unmapped.
pub(crate) fn load_session(
    config: Option<&Path>,
    glossary: Option<&Path>,
) -> Result<Session, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let glossary = match glossary {
        Some(path) => BusinessGlossary::load(path)?,
        None => {
            eprintln!(
                "{} No glossary given, columns will not be mapped to business terms",
                "Note:".yellow()
            );
            BusinessGlossary::new()
        }
    };

    Ok(Session::new(config, glossary))
}

pub(crate) fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
