//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use datadict::export::ExportFormat;
use std::path::PathBuf;

/// Datadict: profile datasets, map them to a business glossary and
/// generate data dictionaries
#[derive(Parser, Debug)]
#[command(name = "datadict")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Profile a data file, map its columns and export its data dictionary
    Run {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Business glossary (YAML)
        #[arg(short, long)]
        glossary: Option<PathBuf>,

        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Dataset name (default: file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Export formats (json, yaml, csv, html, markdown)
        #[arg(short, long, value_delimiter = ',', default_value = "json,html,markdown,csv")]
        format: Vec<ExportFormat>,

        /// Upstream system the file was extracted from, recorded as lineage
        #[arg(long)]
        source_system: Option<String>,

        /// Upstream table the file was extracted from
        #[arg(long, requires = "source_system")]
        source_table: Option<String>,
    },

    /// Show how a file's columns map onto the business glossary
    Glossary {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Business glossary (YAML)
        #[arg(short, long)]
        glossary: Option<PathBuf>,

        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a CREATE TABLE statement for a data file
    Ddl {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Table name (default: file stem)
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Serve the dictionaries of an output directory as a dashboard
    Serve {
        /// Directory containing exported dictionaries
        #[arg(value_name = "DIR", default_value = "output")]
        dir: PathBuf,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["datadict", "run", "data.csv"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Run { output, format, name, .. } => {
                assert_eq!(output, PathBuf::from("output"));
                assert_eq!(
                    format,
                    vec![
                        ExportFormat::Json,
                        ExportFormat::Html,
                        ExportFormat::Markdown,
                        ExportFormat::Csv
                    ]
                );
                assert!(name.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_format_list_and_global_verbose() {
        let cli = Cli::try_parse_from(["datadict", "run", "d.tsv", "--format", "md,yaml", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Run { format, .. } => {
                assert_eq!(format, vec![ExportFormat::Markdown, ExportFormat::Yaml])
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["datadict", "run", "d.csv", "--format", "pdf"]).is_err());
    }

    #[test]
    fn test_source_table_requires_system() {
        assert!(Cli::try_parse_from(["datadict", "run", "d.csv", "--source-table", "t"]).is_err());
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["datadict", "serve", "out", "-p", "8080", "--no-open"]).unwrap();
        match cli.command {
            Commands::Serve { dir, port, no_open } => {
                assert_eq!(dir, PathBuf::from("out"));
                assert_eq!(port, 8080);
                assert!(no_open);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
