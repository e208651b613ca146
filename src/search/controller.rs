//! Paginated search controller
//!
//! Owns the query/page state of one browsing session and coordinates the
//! repository lookups each load needs. Loads may overlap: a user can type
//! faster than the repository answers, and lookups settle in any order.
//!
//! # Stale-response suppression
//!
//! ```text
//! load("a")   ──issue gen 1──────────────────────────settle──> discarded (1 != 3)
//! load("ab")  ────issue gen 2─────────settle──> discarded (2 != 3)
//! load("abc") ──────issue gen 3──settle──> committed (3 == 3)
//! ```
//!
//! Every load captures a generation token while it applies the loading
//! transition. At settlement it commits only if its token is still the current
//! one. Token check and commit happen under the same lock as issuance, so a
//! load can never overwrite the result of a newer one, whatever order the
//! lookups finish in. Superseded lookups are not cancelled; they run to
//! completion and their results are dropped.
//!
//! Dropping a load future before it settles cancels that load. Its in-flight
//! entry is removed, and if it was still the current load the view shows a
//! retryable "Load cancelled" error instead of loading forever.

use super::error::{LoadOutcome, SearchError};
use super::merge::{self, ResultState};
use super::state::{PageBounds, SearchState, normalize_page, normalize_query};
use crate::Course;
use crate::navigation::{LocationParams, Navigator};
use crate::repository::{self, CourseRepository, RepositoryError};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Snapshot of a session published to renderers after every change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub search: SearchState,
    pub result: ResultState,
    /// Generation of the most recently issued load (0 before the first)
    pub generation: u64,
    /// Generations of loads still in flight, most recent first
    pub in_flight: Vec<u64>,
}

type Lookups = (Vec<Course>, Vec<Course>, usize);

/// Error shown when the current load is dropped before it settles
const CANCELLED: &str = "Load cancelled";

/// Controller for one browsing session
///
/// Construct it at session start; dropping it ends the session. Loads take
/// `&self`, so several can be in flight at once.
pub struct SearchController {
    repository: Arc<dyn CourseRepository>,
    navigator: Mutex<Box<dyn Navigator>>,
    initial: LocationParams,
    view: watch::Sender<SearchView>,
    timeout: Option<Duration>,
}

impl SearchController {
    /// Create a controller, reading the navigator's initial location once
    #[must_use]
    pub fn new(repository: Arc<dyn CourseRepository>, navigator: Box<dyn Navigator>) -> Self {
        let initial = navigator.read_initial();
        let (view, _) = watch::channel(SearchView::default());

        Self {
            repository,
            navigator: Mutex::new(navigator),
            initial,
            view,
            timeout: None,
        }
    }

    /// Fail lookups that have not settled within `timeout`
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parameters the session started with
    #[must_use]
    pub const fn initial(&self) -> &LocationParams {
        &self.initial
    }

    /// Issue the first load from the initial location
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Lookup` if a lookup of this load fails while it is
    /// still the most recent one.
    pub async fn start(&self) -> Result<LoadOutcome, SearchError> {
        let query = self.initial.query.clone().unwrap_or_default();
        let page = self.initial.page.unwrap_or(1);
        self.load(&query, page).await
    }

    /// Load `page` of the courses matching `query`
    ///
    /// The navigator is updated and the loading state is published before any
    /// lookup starts. The filtered page, the recommended page and the match
    /// count are then fetched concurrently.
    ///
    /// # Returns
    /// * `Ok(LoadOutcome::Committed)` - this load's result is now visible
    /// * `Ok(LoadOutcome::Discarded)` - a newer load superseded this one
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Lookup` if a lookup fails and this load is still the
    /// most recent one. The failure is also published as a retryable error state.
    pub async fn load(&self, query: &str, page: u32) -> Result<LoadOutcome, SearchError> {
        let query = normalize_query(query);
        let page = normalize_page(page);

        let ticket = self.issue(query.as_deref(), page);
        let PageBounds { start, end } = ticket.bounds;
        debug!(generation = ticket.generation, query = ?query, page, start, end, "load issued");

        let settled = self.lookup(query.as_deref(), ticket.bounds).await;
        ticket.settle(settled)
    }

    /// Load the first page of `query` (a new search submission)
    ///
    /// # Errors
    ///
    /// See [`SearchController::load`].
    pub async fn search(&self, query: &str) -> Result<LoadOutcome, SearchError> {
        self.load(query, 1).await
    }

    /// Load `page` of the current query (a page-control activation)
    ///
    /// # Errors
    ///
    /// See [`SearchController::load`].
    pub async fn go_to_page(&self, page: u32) -> Result<LoadOutcome, SearchError> {
        let query = self.view.borrow().search.query_str().to_string();
        self.load(&query, page).await
    }

    /// Load the next page, if the last committed result has one
    ///
    /// # Errors
    ///
    /// See [`SearchController::load`].
    pub async fn next_page(&self) -> Result<Option<LoadOutcome>, SearchError> {
        let (page, total_pages) = {
            let view = self.view.borrow();
            (view.search.page(), view.result.total_pages)
        };
        if (page as usize) >= total_pages {
            return Ok(None);
        }
        self.go_to_page(page + 1).await.map(Some)
    }

    /// Load the previous page, unless already on the first
    ///
    /// # Errors
    ///
    /// See [`SearchController::load`].
    pub async fn previous_page(&self) -> Result<Option<LoadOutcome>, SearchError> {
        let page = self.view.borrow().search.page();
        if page <= 1 {
            return Ok(None);
        }
        self.go_to_page(page - 1).await.map(Some)
    }

    /// Reissue the current query and page, e.g. after a failure
    ///
    /// # Errors
    ///
    /// See [`SearchController::load`].
    pub async fn retry(&self) -> Result<LoadOutcome, SearchError> {
        let (query, page) = {
            let view = self.view.borrow();
            (view.search.query_str().to_string(), view.search.page())
        };
        self.load(&query, page).await
    }

    /// Current snapshot
    #[must_use]
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// Receive every published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.subscribe()
    }

    /// Location the navigator currently holds
    #[must_use]
    pub fn location(&self) -> String {
        self.navigator().current()
    }

    /// Number of loads still in flight
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.view.borrow().in_flight.len()
    }

    /// Write the location, apply the loading transition and take a generation token
    ///
    /// The location is written under the view lock so it always names the load
    /// holding the newest generation.
    fn issue(&self, query: Option<&str>, page: u32) -> Ticket<'_> {
        let mut issued = (0, PageBounds::for_page(page));

        self.view.send_modify(|view| {
            self.navigator().write(query, page);
            view.search.set_query(query.unwrap_or_default());
            let bounds = view.search.set_page(page);
            view.result = ResultState::loading();
            view.generation += 1;
            view.in_flight.insert(0, view.generation);
            issued = (view.generation, bounds);
        });

        let (generation, bounds) = issued;
        Ticket {
            view: &self.view,
            generation,
            bounds,
            settled: false,
        }
    }

    async fn lookup(&self, query: Option<&str>, bounds: PageBounds) -> repository::Result<Lookups> {
        let repo = self.repository.as_ref();
        let lookups = async {
            tokio::try_join!(
                repo.get_range_by_search(query, bounds.start, bounds.end),
                repo.get_range(bounds.start, bounds.end),
                repo.get_count_by_search(query),
            )
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, lookups)
                .await
                .map_err(|_| RepositoryError::Timeout(limit))?,
            None => lookups.await,
        }
    }

    fn navigator(&self) -> MutexGuard<'_, Box<dyn Navigator>> {
        self.navigator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-flight entry of one issued load
struct Ticket<'a> {
    view: &'a watch::Sender<SearchView>,
    generation: u64,
    bounds: PageBounds,
    settled: bool,
}

impl Ticket<'_> {
    /// Drop the in-flight entry and commit if still current
    fn settle(mut self, settled: repository::Result<Lookups>) -> Result<LoadOutcome, SearchError> {
        let generation = self.generation;
        self.settled = true;
        let mut outcome = Ok(LoadOutcome::Committed { generation });

        self.view.send_modify(|view| {
            view.in_flight.retain(|g| *g != generation);

            if view.generation != generation {
                if let Err(e) = &settled {
                    debug!(generation, error = %e, "stale lookup failure discarded");
                }
                debug!(generation, current = view.generation, "stale result discarded");
                outcome = Ok(LoadOutcome::Discarded {
                    generation,
                    superseded_by: view.generation,
                });
                return;
            }

            match settled {
                Ok((filtered, defaults, total)) => {
                    debug!(generation, visible = filtered.len(), total, "result committed");
                    view.result = merge::merge(filtered, defaults, total);
                }
                Err(e) => {
                    warn!(generation, error = %e, "lookup failed");
                    view.result = ResultState::failed(e.to_string());
                    outcome = Err(SearchError::Lookup(e));
                }
            }
        });

        outcome
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let generation = self.generation;
        self.view.send_modify(|view| {
            view.in_flight.retain(|g| *g != generation);
            if view.generation == generation {
                view.result = ResultState::failed(CANCELLED);
            }
        });
        debug!(generation, "load dropped before settling");
    }
}
