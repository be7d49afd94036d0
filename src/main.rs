//! searchfield CLI
//!
//! Runs the search page in the terminal, or drives it headlessly from a
//! list of scripted steps.

use clap::{Args, Parser, Subcommand};
use console::style;
use searchfield::{logging, load_results, AppConfig, PageState, Session, Step, Visibility};
use std::path::PathBuf;

/// searchfield - search results page in the terminal
#[derive(Parser)]
#[command(name = "searchfield")]
#[command(version)]
#[command(about = "Search results page with a clear button and loading view", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct PageArgs {
    /// Initial search field value
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    query: String,

    /// JSON file with the search results to list
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal page (default)
    Tui {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Apply scripted steps to the page and print the final state
    Simulate {
        #[command(flatten)]
        page: PageArgs,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Steps: type:TEXT, append:TEXT, clear, activate:N, add:TITLE
        #[arg(allow_hyphen_values = true)]
        steps: Vec<String>,
    },

    /// Print the effective configuration
    Config {
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Tui {
        page: PageArgs::default(),
    }) {
        Commands::Tui { page } => cmd_tui(&page),
        Commands::Simulate {
            page,
            output,
            steps,
        } => cmd_simulate(&page, &output, &steps),
        Commands::Config { config } => cmd_config(config),
    };

    if let Err(e) = result {
        logging::error("MAIN", &e.to_string());
        logging::flush();
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
    logging::flush();
}

/// Load config and results, start logging, and open the page
fn open_page(args: &PageArgs) -> searchfield::Result<Session> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    logging::init(config.log_file.as_deref(), config.log_level);
    logging::separator("searchfield starting");

    let results = match &args.results {
        Some(path) => load_results(path)?,
        None => Vec::new(),
    };
    logging::info(
        "MAIN",
        &format!("{} results, initial query {:?}", results.len(), args.query),
    );

    Session::open(&config, &args.query, &results)
}

fn cmd_tui(args: &PageArgs) -> searchfield::Result<()> {
    let session = open_page(args)?;
    searchfield::tui::run(session)
}

fn cmd_simulate(args: &PageArgs, output: &str, steps: &[String]) -> searchfield::Result<()> {
    let steps = steps
        .iter()
        .map(|s| s.parse::<Step>())
        .collect::<searchfield::Result<Vec<_>>>()?;

    let mut session = open_page(args)?;
    for step in &steps {
        session.apply(step)?;
    }
    let state = session.state()?;

    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&state)?),
        _ => print_state(&state),
    }
    Ok(())
}

fn cmd_config(path: Option<PathBuf>) -> searchfield::Result<()> {
    let config = AppConfig::load_or_default(path.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn visibility_style(visibility: Visibility) -> String {
    let text = format!("{} (display: {})", visibility, visibility.css_display());
    match visibility {
        Visibility::Shown => style(text).green().to_string(),
        Visibility::Hidden => style(text).dim().to_string(),
    }
}

fn print_state(state: &PageState) {
    println!("{}", style("Page State").bold().underlined());
    println!("  Query:        {:?}", state.query);
    println!("  Clear button: {}", visibility_style(state.clear_button));
    println!("  Results:      {}", visibility_style(state.results));
    println!("  Loading:      {}", visibility_style(state.loading));
    println!("  View:         {:?}", state.view_mode);
    println!(
        "  Focus:        {}",
        if state.field_focused {
            "search field"
        } else {
            "elsewhere"
        }
    );

    println!();
    println!("{} ({})", style("Result links").bold(), state.links.len());
    for (i, link) in state.links.iter().enumerate() {
        println!(
            "  {:>3}  {}  {}",
            i,
            link.label,
            style(link.href.as_deref().unwrap_or("-")).dim()
        );
    }

    if let Some(href) = &state.navigation {
        println!();
        println!("{} {}", style("Navigating to").cyan().bold(), href);
    }
}
