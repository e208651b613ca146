//! Swillan CLI application entry point
//!
//! Browse a course catalog five courses at a time. Short pages are padded with
//! recommended courses, and the current query and page are kept in a location
//! string so a session can be resumed.
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! swillan
//! swillan browse --location '?q=rust&page=2'
//!
//! # Print one page
//! swillan search python -p 2
//! swillan search --json
//!
//! # Fill the local catalog
//! swillan catalog import courses.json
//!
//! # Use a remote service for this run
//! swillan --url https://courses.example.com/api search rust
//! ```
//!
//! # Configuration
//!
//! On first run, swillan prompts for the course source. Configuration is stored
//! in the user's config directory (`~/.config/swillan/config.toml` on Linux).
//! `RUST_LOG` controls logging; `-v` raises the level.

use swillan::{
    SwillanError,
    catalog::Catalog,
    cli::{Cli, Commands},
    commands::{self, search::SearchArgs},
    config::SwillanConfig,
    ui::{DialoguerInput, StdoutWriter},
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SwillanError>;

/// Install the tracing subscriber, logging to stderr
///
/// An explicit `-v` wins over `RUST_LOG`; without either only warnings show.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("swillan=info"),
        2 => EnvFilter::new("swillan=debug"),
        _ => EnvFilter::new("swillan=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        let path = SwillanConfig::config_path()?;
        return commands::config(&path, command, &StdoutWriter::new(), cli.quiet);
    }

    let config = SwillanConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;
    let input = DialoguerInput::new();
    let output = StdoutWriter::new();

    if let Commands::Catalog { command } = &command {
        let catalog = Catalog::open(config.catalog_path()?)?;
        return commands::catalog(&catalog, command, &input, &output, quiet);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let repository = commands::open_repository(&config, cli.url.as_deref())?;

    match command {
        Commands::Search { query, page, json } => {
            let args = SearchArgs {
                query,
                page,
                json,
                timeout: config.lookup_timeout(),
                quiet,
            };
            commands::search(&runtime, repository, &args, &output)?;
        }
        Commands::Browse { location } => {
            commands::browse(
                &runtime,
                repository,
                location.as_deref(),
                config.lookup_timeout(),
                &input,
                &output,
                quiet,
            )?;
        }
        Commands::Catalog { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    run(&cli)
}
