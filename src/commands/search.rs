//! Search command - load one page of matching courses and print it

use crate::{
    SwillanError,
    navigation::UrlNavigator,
    repository::CourseRepository,
    search::{SearchController, SearchView},
    ui::{OutputWriter, render},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

type Result<T> = std::result::Result<T, SwillanError>;

/// Parameters of one search invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchArgs {
    pub query: Option<String>,
    pub page: u32,
    pub json: bool,
    pub timeout: Option<Duration>,
    pub quiet: bool,
}

/// Execute the search command
///
/// Prints the rendered view, the view as JSON with `json`, or one
/// `id<TAB>title` line per matching course with `quiet`.
///
/// # Errors
///
/// Returns `SwillanError::SearchError` if a lookup fails or times out, and
/// `SwillanError::JsonError` if the view cannot be serialized.
pub fn execute(
    runtime: &Runtime,
    repository: Arc<dyn CourseRepository>,
    args: &SearchArgs,
    output: &dyn OutputWriter,
) -> Result<SearchView> {
    let controller = SearchController::new(repository, Box::new(UrlNavigator::default()))
        .with_timeout(args.timeout);

    let query = args.query.as_deref().unwrap_or_default();
    runtime.block_on(controller.load(query, args.page))?;

    let view = controller.view();
    if args.json {
        output.write(&serde_json::to_string_pretty(&view)?);
    } else if args.quiet {
        for course in &view.result.visible {
            output.write(&format!("{}\t{}", course.id, course.title));
        }
    } else {
        render::render_view(&view, output);
        output.info(&controller.location());
    }

    Ok(view)
}
