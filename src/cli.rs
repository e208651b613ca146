//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for swillan using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive paginated search (default)
//! - **search**: Load one page and print it
//! - **catalog**: Manage the local course catalog (import, list, count, clear)
//! - **config**: Show and change settings
//!
//! # Examples
//!
//! ```
//! use swillan::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["swillan", "search", "rust", "-p", "2"]);
//! match cli.get_command() {
//!     Commands::Search { query, page, .. } => {
//!         assert_eq!(query.as_deref(), Some("rust"));
//!         assert_eq!(page, 2);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "swillan")]
#[command(about = "Browse a course catalog page by page", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read courses from this service instead of the configured source
    #[arg(long = "url", value_name = "BASE_URL", global = true)]
    pub url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse courses interactively (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Location to start from, e.g. "?q=rust&page=2"
        #[arg(short = 'l', long = "location", value_name = "URL")]
        location: Option<String>,
    },

    /// Print one page of matching courses
    #[command(visible_alias = "s")]
    Search {
        /// Text to look for in title, author and description
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Page to load (1-based)
        #[arg(short = 'p', long = "page", value_name = "PAGE", default_value_t = 1)]
        page: u32,

        /// Print the loaded view as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Manage the local course catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Catalog management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommands {
    /// Import courses from a JSON array file
    Import {
        /// File holding `[{"id": .., "title": .., ...}, ...]`
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List every course in the catalog
    #[command(visible_alias = "ls")]
    List,

    /// Print the number of courses in the catalog
    Count,

    /// Remove every course from the catalog
    Clear {
        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print every setting
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., `lookup_timeout_secs`)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., source)
        #[arg(value_name = "KEY")]
        key: String,

        /// New value; empty clears optional settings
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { location: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["swillan"]);
        assert_eq!(cli.get_command(), Commands::Browse { location: None });
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["swillan", "search", "python", "-p", "3", "--json"]);
        assert_eq!(
            cli.get_command(),
            Commands::Search {
                query: Some("python".into()),
                page: 3,
                json: true,
            }
        );
    }

    #[test]
    fn test_search_defaults_to_first_page() {
        let cli = Cli::parse_from(["swillan", "s"]);
        assert_eq!(
            cli.get_command(),
            Commands::Search {
                query: None,
                page: 1,
                json: false,
            }
        );
    }

    #[test]
    fn test_parse_browse_location() {
        let cli = Cli::parse_from(["swillan", "b", "--location", "?q=rust&page=2"]);
        assert_eq!(
            cli.get_command(),
            Commands::Browse {
                location: Some("?q=rust&page=2".into())
            }
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "swillan",
            "search",
            "-q",
            "-vv",
            "--url",
            "http://localhost:8080",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_parse_catalog_commands() {
        let cli = Cli::parse_from(["swillan", "catalog", "import", "courses.json"]);
        assert_eq!(
            cli.get_command(),
            Commands::Catalog {
                command: CatalogCommands::Import {
                    file: PathBuf::from("courses.json")
                }
            }
        );

        let cli = Cli::parse_from(["swillan", "catalog", "clear", "-y"]);
        assert_eq!(
            cli.get_command(),
            Commands::Catalog {
                command: CatalogCommands::Clear { yes: true }
            }
        );
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::parse_from(["swillan", "config", "set", "source", "http"]);
        assert_eq!(
            cli.get_command(),
            Commands::Config {
                command: ConfigCommands::Set {
                    key: "source".into(),
                    value: "http".into()
                }
            }
        );
    }

    #[test]
    fn test_negative_page_rejected() {
        assert!(Cli::try_parse_from(["swillan", "search", "-p", "-1"]).is_err());
    }
}
