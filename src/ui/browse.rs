//! Interactive browse loop
//!
//! Renders the session, offers the actions that make sense for the current
//! snapshot and forwards the choice to the [`SearchController`]. Prompts are
//! blocking, so the loop is synchronous and drives each load on a tokio
//! runtime until it settles.

use super::input::UserInput;
use super::output::OutputWriter;
use super::render;
use crate::SwillanError;
use crate::search::{LoadOutcome, SearchController, SearchError, SearchView};
use std::future::Future;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing::debug;

type Result<T> = std::result::Result<T, SwillanError>;

/// What the user can do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    NewSearch,
    NextPage,
    PreviousPage,
    GoToPage,
    Retry,
    Quit,
}

impl BrowseAction {
    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewSearch => "New search",
            Self::NextPage => "Next page",
            Self::PreviousPage => "Previous page",
            Self::GoToPage => "Go to page…",
            Self::Retry => "Retry",
            Self::Quit => "Quit",
        }
    }

    /// Actions offered for `view`, in menu order
    #[must_use]
    pub fn available(view: &SearchView) -> Vec<Self> {
        let result = &view.result;
        let page = view.search.page() as usize;
        let mut actions = Vec::with_capacity(6);

        if result.is_failed() {
            actions.push(Self::Retry);
        }
        actions.push(Self::NewSearch);
        if !result.loading && !result.is_failed() {
            if page < result.total_pages {
                actions.push(Self::NextPage);
            }
            if page > 1 {
                actions.push(Self::PreviousPage);
            }
            if result.shows_pagination() {
                actions.push(Self::GoToPage);
            }
        }
        actions.push(Self::Quit);
        actions
    }
}

/// Summary of a finished browse session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSummary {
    /// Loads that settled without a lookup error
    pub loads: usize,
    /// Loads whose result was shown
    pub committed: usize,
    /// Final snapshot
    pub view: SearchView,
}

/// Interactive browser over one search session
pub struct Browser<'a> {
    controller: &'a SearchController,
    runtime: &'a Runtime,
    input: &'a dyn UserInput,
    output: &'a dyn OutputWriter,
}

impl<'a> Browser<'a> {
    #[must_use]
    pub const fn new(
        controller: &'a SearchController,
        runtime: &'a Runtime,
        input: &'a dyn UserInput,
        output: &'a dyn OutputWriter,
    ) -> Self {
        Self {
            controller,
            runtime,
            input,
            output,
        }
    }

    /// Run until the user quits or cancels
    ///
    /// Load failures are shown and can be retried; they do not end the session.
    ///
    /// # Errors
    ///
    /// Returns `SwillanError` if a prompt cannot be read.
    pub fn run(&self) -> Result<BrowseSummary> {
        let mut loads = 0;
        let mut committed = 0;
        let mut tally = |outcome: Option<LoadOutcome>| {
            if let Some(outcome) = outcome {
                loads += 1;
                committed += usize::from(outcome.is_committed());
            }
        };

        tally(self.dispatch(|c| async move { c.start().await.map(Some) }));

        loop {
            let view = self.controller.view();
            render::render_view(&view, self.output);

            let actions = BrowseAction::available(&view);
            let labels: Vec<String> = actions.iter().map(|a| a.label().to_string()).collect();
            let choice = self.input.prompt_select("What next?", &labels, Some(0))?;

            let Some(action) = choice.and_then(|i| actions.get(i).copied()) else {
                break;
            };
            debug!(?action, "browse action");

            let outcome = match action {
                BrowseAction::Quit => break,
                BrowseAction::NewSearch => {
                    let current = view.search.query_str().to_string();
                    let Some(query) = self.prompt_text("Search courses", Some(&current))? else {
                        continue;
                    };
                    self.dispatch(|c| async move { c.search(&query).await.map(Some) })
                }
                BrowseAction::NextPage => self.dispatch(SearchController::next_page),
                BrowseAction::PreviousPage => self.dispatch(SearchController::previous_page),
                BrowseAction::GoToPage => {
                    let Some(page) = self.prompt_page(&view)? else {
                        continue;
                    };
                    self.dispatch(|c| async move { c.go_to_page(page).await.map(Some) })
                }
                BrowseAction::Retry => self.dispatch(|c| async move { c.retry().await.map(Some) }),
            };
            tally(outcome);
        }

        Ok(BrowseSummary {
            loads,
            committed,
            view: self.controller.view(),
        })
    }

    /// Drive one load to completion, drawing placeholders while it is pending
    fn dispatch<F, Fut>(&self, load: F) -> Option<LoadOutcome>
    where
        F: FnOnce(&'a SearchController) -> Fut,
        Fut: Future<Output = std::result::Result<Option<LoadOutcome>, SearchError>>,
    {
        let progress = self.controller.subscribe();
        let (settled, ()) = self.runtime.block_on(async {
            tokio::join!(load(self.controller), show_progress(progress, self.output))
        });

        match settled {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "load failed");
                None
            }
        }
    }

    fn prompt_text(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        Ok(self
            .input
            .prompt_text(prompt, default.filter(|d| !d.is_empty()), true)?)
    }

    fn prompt_page(&self, view: &SearchView) -> Result<Option<u32>> {
        let total = view.result.total_pages;
        let prompt = format!("Page (1-{total})");
        let Some(raw) = self.prompt_text(&prompt, None)? else {
            return Ok(None);
        };

        match raw.trim().parse::<u32>() {
            Ok(page) if page >= 1 && (page as usize) <= total => Ok(Some(page)),
            _ => {
                let raw = raw.trim();
                self.output.warning(&format!("'{raw}' is not a page between 1 and {total}"));
                Ok(None)
            }
        }
    }
}

/// Draw placeholder rows once if the load is still pending after issuing
async fn show_progress(mut progress: watch::Receiver<SearchView>, output: &dyn OutputWriter) {
    if !progress.borrow_and_update().result.loading {
        return;
    }
    render::render_skeleton(output);
    let _ = progress.wait_for(|view| !view.result.loading).await;
}
