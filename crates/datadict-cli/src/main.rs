//! Datadict CLI - data profiling, glossary mapping and data dictionaries.

mod cli;
mod commands;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use commands::run::RunArgs;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            file,
            glossary,
            config,
            output,
            name,
            format,
            source_system,
            source_table,
        } => commands::run::run(
            RunArgs {
                file,
                glossary,
                config,
                output,
                name,
                formats: format,
                source_system,
                source_table,
            },
            cli.verbose,
        ),

        Commands::Glossary {
            file,
            glossary,
            config,
            json,
        } => commands::glossary::run(file, glossary, config, json),

        Commands::Ddl { file, table } => commands::ddl::run(file, table),

        Commands::Serve { dir, port, no_open } => commands::serve::run(dir, port, no_open),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
