//! Writers for profiles, metadata, glossaries and dictionaries.
//!
//! Every artifact of a dataset `name` lands in one output directory:
//!
//! | Format   | Files |
//! |----------|-------|
//! | JSON     | `name_profile.json`, `name_metadata.json`, `name_glossary.json`, `name_data_dictionary.json` |
//! | YAML     | `name_glossary.yaml` |
//! | CSV      | `name_glossary.csv` |
//! | HTML     | `name_data_dictionary.html` |
//! | Markdown | `name_data_dictionary.md` |
//!
//! [`DASHBOARD_FILE`] indexes the HTML dictionaries of a directory.

mod csv;
mod dashboard;
mod html;
mod json;
mod markdown;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use self::csv::{glossary_csv, write_glossary_csv};
pub use dashboard::render_dashboard;
pub use html::{escape_html, render_html};
pub use json::{list_dictionaries, load_dictionary, write_json};
pub use markdown::render_markdown;

use crate::dictionary::DataDictionary;
use crate::error::{DictError, Result};
use crate::glossary::DatasetGlossary;
use crate::metadata::TechnicalMetadata;
use crate::profile::DatasetProfile;
use json::write_text;

/// Dashboard file name.
pub const DASHBOARD_FILE: &str = "index.html";

pub(crate) const DICTIONARY_JSON_SUFFIX: &str = "_data_dictionary.json";

/// Output format selectable for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
    Html,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Json,
        ExportFormat::Yaml,
        ExportFormat::Csv,
        ExportFormat::Html,
        ExportFormat::Markdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "markdown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = DictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "csv" => Ok(ExportFormat::Csv),
            "html" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(DictError::InvalidInput(format!("unknown export format '{}'", other))),
        }
    }
}

/// `{name}_data_dictionary.{ext}`
pub fn dictionary_file(dataset_name: &str, format: ExportFormat) -> String {
    format!("{}_data_dictionary.{}", dataset_name, format.extension())
}

/// All artifacts of one dataset, ready to be written.
#[derive(Debug, Clone, Copy)]
pub struct ExportBundle<'a> {
    pub profile: &'a DatasetProfile,
    pub metadata: &'a TechnicalMetadata,
    pub glossary: &'a DatasetGlossary,
    pub dictionary: &'a DataDictionary,
}

impl ExportBundle<'_> {
    /// Write the requested formats into `dir` and return the files written.
    pub fn write(&self, dir: impl AsRef<Path>, formats: &[ExportFormat]) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let name = self.dictionary.dataset_name.as_str();
        let mut written = Vec::new();

        for &format in formats {
            match format {
                ExportFormat::Json => {
                    let profile = dir.join(format!("{}_profile.json", name));
                    write_json(self.profile, &profile)?;
                    let metadata = dir.join(format!("{}_metadata.json", name));
                    write_json(self.metadata, &metadata)?;
                    let glossary = dir.join(format!("{}_glossary.json", name));
                    write_json(self.glossary, &glossary)?;
                    let dictionary = dir.join(dictionary_file(name, format));
                    write_json(self.dictionary, &dictionary)?;
                    written.extend([profile, metadata, glossary, dictionary]);
                }
                ExportFormat::Yaml => {
                    let path = dir.join(format!("{}_glossary.yaml", name));
                    write_text(&path, &serde_yaml::to_string(self.glossary)?)?;
                    written.push(path);
                }
                ExportFormat::Csv => {
                    let path = dir.join(format!("{}_glossary.csv", name));
                    write_glossary_csv(self.glossary, &path)?;
                    written.push(path);
                }
                ExportFormat::Html => {
                    let path = dir.join(dictionary_file(name, format));
                    write_text(&path, &render_html(self.dictionary))?;
                    written.push(path);
                }
                ExportFormat::Markdown => {
                    let path = dir.join(dictionary_file(name, format));
                    write_text(&path, &render_markdown(self.dictionary))?;
                    written.push(path);
                }
            }
        }

        info!(dataset = name, files = written.len(), dir = %dir.display(), "Exported dataset");
        Ok(written)
    }
}

/// Write [`DASHBOARD_FILE`] into `dir`.
pub fn write_dashboard<'a>(
    dir: impl AsRef<Path>,
    dictionaries: impl IntoIterator<Item = &'a DataDictionary>,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(DASHBOARD_FILE);
    write_text(&path, &render_dashboard(dictionaries))?;
    Ok(path)
}
