//! Paginated course search
//!
//! - [`state`]: query/page state and page offsets
//! - [`controller`]: issues loads and suppresses stale results
//! - [`merge`]: pads sparse pages with recommended courses

pub mod controller;
pub mod error;
pub mod merge;
pub mod state;

pub use controller::{SearchController, SearchView};
pub use error::{LoadOutcome, SearchError};
pub use merge::{Notice, ResultState};
pub use state::{PAGE_SIZE, PageBounds, SearchState};
