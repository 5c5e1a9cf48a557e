//! Glossary command - show how a file's columns map onto the glossary.

use std::path::PathBuf;

use colored::Colorize;
use datadict::glossary::ValidationIssueKind;

use super::{ensure_exists, load_session};

pub fn run(
    file: PathBuf,
    glossary: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let mut session = load_session(config.as_deref(), glossary.as_deref())?;
    let parser = datadict::input::Parser::new();
    let (table, source) = parser.parse_file(&file)?;
    let name = source.stem();

    let mapped = session.map_columns(&name, &table.column_names())?;

    if json {
        println!("{}", serde_json::to_string_pretty(mapped)?);
        return Ok(());
    }

    print!("{}", mapped.report());

    let validation = session.validate_mappings(&name)?;
    println!();
    println!("{}", "Validation:".yellow().bold());
    println!("  Coverage: {}", validation.coverage_label());
    println!("  Score: {:.1}", validation.quality_score);
    if validation.mapped_columns < validation.total_columns {
        println!(
            "  {} {} of {} columns",
            "Unmapped:".red(),
            validation.total_columns - validation.mapped_columns,
            validation.total_columns
        );
    }

    for issue in &validation.issues {
        let label = match issue.kind {
            ValidationIssueKind::MissingDefinitions => "Missing definitions:".yellow(),
            ValidationIssueKind::MissingOwners => "Missing owners:".blue(),
        };
        println!(
            "  {} {} ({})",
            label,
            issue.count,
            issue.columns.join(", ")
        );
    }

    Ok(())
}
