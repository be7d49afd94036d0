//! searchfield GUI Entry Point
//!
//! Opens the search page in a native window.

#![cfg_attr(windows, windows_subsystem = "windows")]

use clap::Parser;
use searchfield::{logging, load_results, AppConfig, Session};
use std::path::PathBuf;

/// searchfield window
#[derive(Parser)]
#[command(name = "searchfield-gui")]
#[command(version)]
struct Cli {
    /// Initial search field value
    #[arg(short, long, default_value = "")]
    query: String,

    /// JSON file with the search results to list
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> searchfield::Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    logging::init(config.log_file.as_deref(), config.log_level);
    logging::separator("searchfield-gui starting");

    let results = match &cli.results {
        Some(path) => load_results(path)?,
        None => Vec::new(),
    };
    let session = Session::open(&config, &cli.query, &results)?;
    searchfield::gui::run(session)
}

fn main() {
    let result = run(Cli::parse());
    logging::flush();

    if let Err(e) = result {
        logging::error("MAIN", &e.to_string());
        eprintln!("{} {}", console::style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
