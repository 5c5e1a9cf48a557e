//! DDL command - print a CREATE TABLE statement inferred from a file.

use std::path::PathBuf;

use datadict::input::Parser;
use datadict::TechnicalMetadata;

use super::ensure_exists;

pub fn run(file: PathBuf, table: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let (data, source) = Parser::new().parse_file(&file)?;
    let table = table.unwrap_or_else(|| source.stem());

    let metadata = TechnicalMetadata::extract(&data, &table, None)?;
    println!("{}", metadata.ddl(&table));

    Ok(())
}
