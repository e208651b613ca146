//! Browse command - interactive paginated search

use crate::{
    SwillanError,
    navigation::UrlNavigator,
    repository::CourseRepository,
    search::SearchController,
    ui::{BrowseSummary, Browser, OutputWriter, UserInput},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

type Result<T> = std::result::Result<T, SwillanError>;

/// Execute the browse command
///
/// Starts from `location` (a URL or a bare `?q=..&page=..` query string) and
/// prints the final location when the session ends, so it can be resumed.
///
/// # Errors
/// Returns an error if the location does not parse or a prompt cannot be read
pub fn execute(
    runtime: &Runtime,
    repository: Arc<dyn CourseRepository>,
    location: Option<&str>,
    timeout: Option<Duration>,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<BrowseSummary> {
    let navigator = match location {
        Some(location) => UrlNavigator::parse(location)?,
        None => UrlNavigator::default(),
    };
    let controller = SearchController::new(repository, Box::new(navigator)).with_timeout(timeout);

    let summary = Browser::new(&controller, runtime, input, output).run()?;

    if quiet {
        output.write(&controller.location());
    } else {
        output.info(&format!(
            "{} page(s) shown. Resume with: swillan browse --location '{}'",
            summary.committed,
            controller.location()
        ));
    }
    Ok(summary)
}
