//! Run command - profile a file, map it and export its dictionary.

use std::path::PathBuf;

use colored::Colorize;
use datadict::export::ExportFormat;
use datadict::metadata::SourceInfo;
use datadict::quality::QualityBand;

use super::{ensure_exists, load_session};

/// Arguments of the `run` command.
pub struct RunArgs {
    pub file: PathBuf,
    pub glossary: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output: PathBuf,
    pub name: Option<String>,
    pub formats: Vec<ExportFormat>,
    pub source_system: Option<String>,
    pub source_table: Option<String>,
}

pub fn run(args: RunArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&args.file)?;

    println!(
        "{} {}",
        "Documenting".cyan().bold(),
        args.file.display().to_string().white()
    );

    let mut session = load_session(args.config.as_deref(), args.glossary.as_deref())?;

    let source = args.source_system.map(|system| SourceInfo {
        system: Some(system),
        table: args.source_table,
        load_type: None,
    });

    if verbose {
        println!("  Glossary terms: {}", session.business_glossary().len());
    }

    let (file, output) = session.run_file(&args.file, args.name.as_deref(), source.as_ref())?;
    let dictionary = output.dictionary;
    let name = dictionary.dataset_name.clone();

    if verbose {
        println!("  Format: {}", file.format);
        println!("  Hash: {}", file.hash);
        println!();
        println!("{}", "Columns:".yellow().bold());
        for column in &dictionary.columns {
            println!(
                "  {:24} {:10} {:12} {:16} {}",
                column.technical_name,
                column.data_type.native.as_str(),
                column.profile.kind_label(),
                column.data_type.sql,
                column.term.match_type.as_str()
            );
        }
        println!();
    }

    let quality = &dictionary.data_quality;
    let score = quality.quality_score.to_string();
    let score = match quality.quality_score.band {
        QualityBand::Excellent | QualityBand::Good => score.green(),
        QualityBand::Fair => score.yellow(),
        QualityBand::NeedsImprovement => score.red(),
    };

    println!(
        "Profiled {} records across {} fields",
        dictionary.overview.record_count.to_string().white().bold(),
        dictionary.overview.field_count.to_string().white().bold()
    );
    println!("  Completeness: {:.2}%", quality.overall_completeness);
    println!("  Quality score: {}", score);
    println!(
        "  Quality issues: {}",
        quality.quality_issues.len().to_string().yellow()
    );

    let validation = session.validate_mappings(&name)?;
    println!("  Glossary coverage: {}", validation.coverage_label());

    let pii = session.pii_columns(&name)?;
    if !pii.is_empty() {
        println!("  PII columns: {}", pii.join(", ").red());
    }

    let written = session.export(&name, &args.output, &args.formats)?;
    let dashboard = session.export_dashboard(&args.output)?;

    println!();
    println!("{}", "Written:".green().bold());
    for path in written.iter().chain(std::iter::once(&dashboard)) {
        println!("  {}", path.display());
    }

    Ok(())
}
