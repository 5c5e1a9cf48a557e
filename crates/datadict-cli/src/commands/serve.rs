//! Serve command - browse exported dictionaries in the dashboard.

use std::path::PathBuf;

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(dir: PathBuf, port: u16, no_open: bool) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::load(dir.clone())?;

    let count = state.dictionaries.try_read().map(|d| d.len()).unwrap_or(0);
    if count == 0 {
        println!(
            "{} No dictionaries found in {}, run `datadict run` first",
            "Note:".yellow(),
            dir.display()
        );
    }

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting dashboard at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Directory: {}", dir.display());
    println!("  Datasets: {}", count);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let shutdown = async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
        };

        app::run_server(state, port, shutdown).await
    })
}
