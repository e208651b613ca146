//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when swillan is run for the first time.

use super::{Source, SwillanConfig};
use config::ConfigError;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for the course source
///
/// 1. Prompts for the source (local catalog or remote service)
/// 2. Prompts for the catalog location or the service URL
/// 3. Creates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The system data directory cannot be determined
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup() -> Result<SwillanConfig, ConfigError> {
    println!("Welcome to swillan! Let's set up where courses come from.\n");

    let theme = ColorfulTheme::default();
    let read_error =
        |e: dialoguer::Error| ConfigError::Message(format!("Failed to read input: {e}"));

    let choice = Select::with_theme(&theme)
        .with_prompt("Course source")
        .items(&["Local catalog", "Remote service (HTTP)"])
        .default(0)
        .interact()
        .map_err(read_error)?;

    let mut config = SwillanConfig::default();

    if choice == 0 {
        let default_path = SwillanConfig::default_catalog_path()?;
        let path: String = Input::with_theme(&theme)
            .with_prompt("Catalog location")
            .default(default_path.to_string_lossy().to_string())
            .interact_text()
            .map_err(read_error)?;
        config.source = Source::Catalog;
        config.catalog_path = Some(PathBuf::from(path));
    } else {
        let url: String = Input::with_theme(&theme)
            .with_prompt("Service base URL")
            .validate_with(|input: &String| {
                url::Url::parse(input)
                    .map(|_| ())
                    .map_err(|e| format!("Not a valid URL: {e}"))
            })
            .interact_text()
            .map_err(read_error)?;
        config.source = Source::Http;
        config.base_url = Some(url);
    }

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
