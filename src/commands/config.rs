//! Config command - show, read and change settings

use crate::{
    SwillanError,
    cli::ConfigCommands,
    config::{KEYS, SwillanConfig},
    ui::OutputWriter,
};
use std::path::Path;

type Result<T> = std::result::Result<T, SwillanError>;

/// Execute a config subcommand against the file at `path`
///
/// # Errors
///
/// Returns `SwillanError::InvalidInput` for an unknown key and
/// `SwillanError::ConfigError` if the file cannot be read or written or the
/// value does not parse.
pub fn execute(
    path: &Path,
    command: &ConfigCommands,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let mut config = SwillanConfig::load_from(path)?;

    match command {
        ConfigCommands::Show => {
            for key in KEYS {
                let value = config.get(key).unwrap_or_default();
                output.write(&format!("{key} = {value}"));
            }
        }
        ConfigCommands::Get { key } => {
            let value = config
                .get(key)
                .ok_or_else(|| SwillanError::InvalidInput(format!("Unknown setting '{key}'")))?;
            output.write(&value);
        }
        ConfigCommands::Set { key, value } => {
            config.set(key, value)?;
            config.save_to(path)?;
            if !quiet {
                output.success(&format!("Set {key} = {}", config.get(key).unwrap_or_default()));
            }
        }
    }
    Ok(())
}
