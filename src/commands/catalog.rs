//! Catalog command - import, list, count and clear the local catalog

use crate::{
    SwillanError,
    catalog::Catalog,
    cli::CatalogCommands,
    ui::{OutputWriter, UserInput},
};

type Result<T> = std::result::Result<T, SwillanError>;

/// Execute a catalog subcommand
///
/// # Errors
///
/// Returns `SwillanError` if a catalog operation fails or the confirmation
/// prompt cannot be read.
pub fn execute(
    catalog: &Catalog,
    command: &CatalogCommands,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    match command {
        CatalogCommands::Import { file } => {
            let imported = catalog.import_json(file)?;
            if !quiet {
                output.success(&format!("Imported {imported} course(s) from {}", file.display()));
            }
        }
        CatalogCommands::List => list(catalog, output, quiet)?,
        CatalogCommands::Count => output.write(&catalog.count().to_string()),
        CatalogCommands::Clear { yes } => clear(catalog, *yes || quiet, input, output, quiet)?,
    }
    Ok(())
}

fn list(catalog: &Catalog, output: &dyn OutputWriter, quiet: bool) -> Result<()> {
    let courses = catalog.list_all()?;

    if courses.is_empty() {
        if !quiet {
            output.info("No courses in catalog.");
        }
        return Ok(());
    }

    if !quiet {
        output.write("Courses in catalog:");
    }
    for course in courses {
        if quiet {
            output.write(&format!("{}\t{}", course.id, course.title));
        } else {
            output.write(&format!("  {}  {} by {}", course.id, course.title, course.author));
        }
    }
    Ok(())
}

fn clear(
    catalog: &Catalog,
    confirmed: bool,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let count = catalog.count();
    if count == 0 {
        if !quiet {
            output.info("Catalog is already empty.");
        }
        return Ok(());
    }

    let confirmed = confirmed
        || input.prompt_confirm(&format!("Remove all {count} course(s)?"), false)? == Some(true);
    if !confirmed {
        output.info("Nothing removed.");
        return Ok(());
    }

    catalog.clear()?;
    if !quiet {
        output.success(&format!("Removed {count} course(s)"));
    }
    Ok(())
}
