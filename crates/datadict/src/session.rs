//! Per-run state: every artifact produced for each dataset name.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::info;

use crate::config::Config;
use crate::dictionary::{DataDictionary, DictionaryAssembler};
use crate::error::{DictError, Result};
use crate::export::{self, ExportBundle, ExportFormat};
use crate::glossary::{BusinessGlossary, DatasetGlossary, MappingValidation, TermMapper};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::metadata::{SourceInfo, TechnicalMetadata};
use crate::profile::{DatasetProfile, Profiler};

/// Artifacts produced by [`Session::run`].
#[derive(Debug, Clone, Copy)]
pub struct RunOutput<'a> {
    pub profile: &'a DatasetProfile,
    pub metadata: &'a TechnicalMetadata,
    pub glossary: &'a DatasetGlossary,
    pub dictionary: &'a DataDictionary,
}

/// Holds one configuration and glossary and the results produced with them.
///
/// Results are keyed by dataset name. Processing a name again replaces its
/// earlier results; asking for a name that was never processed yields
/// [`DictError::NotFound`].
///
/// # Example
///
/// ```
/// use datadict::{BusinessGlossary, Config, Session};
/// use datadict::input::Parser;
///
/// let table = Parser::new().parse_bytes(b"id,email\n1,a@x.com\n2,b@x.com").unwrap();
/// let mut session = Session::new(Config::default(), BusinessGlossary::new());
///
/// let output = session.run("customers", &table, None).unwrap();
/// assert_eq!(output.dictionary.columns.len(), 2);
/// assert!(session.profile("orders").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    parser: Parser,
    profiler: Profiler,
    mapper: TermMapper,
    assembler: DictionaryAssembler,
    profiles: IndexMap<String, DatasetProfile>,
    metadata: IndexMap<String, TechnicalMetadata>,
    glossaries: IndexMap<String, DatasetGlossary>,
    dictionaries: IndexMap<String, DataDictionary>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default(), BusinessGlossary::default())
    }
}

impl Session {
    pub fn new(config: Config, glossary: BusinessGlossary) -> Self {
        Self {
            parser: Parser::new(),
            profiler: Profiler::new(config.profiling.clone()),
            mapper: TermMapper::new(glossary, config.glossary.clone()),
            assembler: DictionaryAssembler::new(config.dictionary.clone()),
            config,
            profiles: IndexMap::new(),
            metadata: IndexMap::new(),
            glossaries: IndexMap::new(),
            dictionaries: IndexMap::new(),
        }
    }

    /// Use a custom parser configuration for [`Session::run_file`].
    pub fn with_parser(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn business_glossary(&self) -> &BusinessGlossary {
        self.mapper.glossary()
    }

    /// Names of datasets with a dictionary, in processing order.
    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.dictionaries.keys().map(String::as_str)
    }

    // ========================================================================
    // Individual stages
    // ========================================================================

    pub fn profile_dataset(&mut self, name: &str, table: &DataTable) -> Result<&DatasetProfile> {
        let profile = self.profiler.profile(table, name)?;
        Ok(insert(&mut self.profiles, name, profile))
    }

    pub fn extract_metadata(
        &mut self,
        name: &str,
        table: &DataTable,
        source: Option<&SourceInfo>,
    ) -> Result<&TechnicalMetadata> {
        let metadata = TechnicalMetadata::extract(table, name, source)?;
        Ok(insert(&mut self.metadata, name, metadata))
    }

    pub fn map_columns<S: AsRef<str>>(&mut self, name: &str, columns: &[S]) -> Result<&DatasetGlossary> {
        let glossary = self.mapper.map_dataset(name, columns)?;
        Ok(insert(&mut self.glossaries, name, glossary))
    }

    /// Assemble a dictionary from the stored profile, metadata and mapping.
    pub fn generate_dictionary(&mut self, name: &str) -> Result<&DataDictionary> {
        let dictionary = self
            .assembler
            .assemble(self.profile(name)?, self.metadata(name)?, self.glossary(name)?)?;
        Ok(insert(&mut self.dictionaries, name, dictionary))
    }

    // ========================================================================
    // Whole pipeline
    // ========================================================================

    /// Profile, extract, map and assemble in one step.
    ///
    /// Nothing is stored for `name` unless every stage succeeds.
    pub fn run(&mut self, name: &str, table: &DataTable, source: Option<&SourceInfo>) -> Result<RunOutput<'_>> {
        let profile = self.profiler.profile(table, name)?;
        let metadata = TechnicalMetadata::extract(table, name, source)?;
        let glossary = self.mapper.map_dataset(name, &table.column_names())?;
        let dictionary = self.assembler.assemble(&profile, &metadata, &glossary)?;

        info!(
            dataset = name,
            score = %dictionary.data_quality.quality_score,
            mapped = glossary.mapped_columns,
            "Dataset documented"
        );

        insert(&mut self.profiles, name, profile);
        insert(&mut self.metadata, name, metadata);
        insert(&mut self.glossaries, name, glossary);
        insert(&mut self.dictionaries, name, dictionary);
        self.output(name)
    }

    /// Parse a delimited file and [`run`](Session::run) it.
    ///
    /// The dataset is named after the file stem unless `name` is given.
    pub fn run_file(
        &mut self,
        path: impl AsRef<Path>,
        name: Option<&str>,
        source: Option<&SourceInfo>,
    ) -> Result<(SourceMetadata, RunOutput<'_>)> {
        let (table, file) = self.parser.parse_file(path)?;
        let name = name.map(str::to_string).unwrap_or_else(|| file.stem());
        let output = self.run(&name, &table, source)?;
        Ok((file, output))
    }

    fn output(&self, name: &str) -> Result<RunOutput<'_>> {
        Ok(RunOutput {
            profile: self.profile(name)?,
            metadata: self.metadata(name)?,
            glossary: self.glossary(name)?,
            dictionary: self.dictionary(name)?,
        })
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn profile(&self, name: &str) -> Result<&DatasetProfile> {
        self.profiles.get(name).ok_or_else(|| DictError::not_found("profile", name))
    }

    pub fn metadata(&self, name: &str) -> Result<&TechnicalMetadata> {
        self.metadata.get(name).ok_or_else(|| DictError::not_found("metadata", name))
    }

    pub fn glossary(&self, name: &str) -> Result<&DatasetGlossary> {
        self.glossaries.get(name).ok_or_else(|| DictError::not_found("mappings", name))
    }

    pub fn dictionary(&self, name: &str) -> Result<&DataDictionary> {
        self.dictionaries.get(name).ok_or_else(|| DictError::not_found("dictionary", name))
    }

    pub fn validate_mappings(&self, name: &str) -> Result<MappingValidation> {
        Ok(MappingValidation::compute(self.glossary(name)?))
    }

    pub fn pii_columns(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.glossary(name)?.pii_columns())
    }

    pub fn columns_by_owner(&self, name: &str) -> Result<IndexMap<String, Vec<String>>> {
        Ok(self.glossary(name)?.columns_by_owner())
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Write a dataset's artifacts in the given formats into `dir`.
    pub fn export(&self, name: &str, dir: impl AsRef<Path>, formats: &[ExportFormat]) -> Result<Vec<PathBuf>> {
        let output = self.output(name)?;
        ExportBundle {
            profile: output.profile,
            metadata: output.metadata,
            glossary: output.glossary,
            dictionary: output.dictionary,
        }
        .write(dir, formats)
    }

    /// Write the dashboard page covering every dictionary in the session.
    pub fn export_dashboard(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        export::write_dashboard(dir, self.dictionaries.values())
    }
}

fn insert<'a, T>(store: &'a mut IndexMap<String, T>, name: &str, value: T) -> &'a T {
    let (index, _) = store.insert_full(name.to_string(), value);
    &store[index]
}
