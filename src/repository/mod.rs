//! Course repository abstraction
//!
//! The search controller only ever talks to a [`CourseRepository`]. Two
//! implementations ship with the crate:
//!
//! - [`crate::catalog::Catalog`]: a local sled-backed catalog
//! - [`HttpRepository`]: a remote JSON service
//!
//! Every lookup is asynchronous and may fail.

pub mod error;
pub mod http;

pub use error::RepositoryError;
pub use http::HttpRepository;

use crate::Course;
use async_trait::async_trait;

/// Result alias for repository lookups
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Source of courses queried by the search controller
///
/// Ranges are half-open (`start..end`) offsets into the ordered catalog.
/// A `None` query matches every course.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Unfiltered courses in `start..end`
    async fn get_range(&self, start: usize, end: usize) -> Result<Vec<Course>>;

    /// Courses matching `query`, then sliced to `start..end`
    async fn get_range_by_search(
        &self,
        query: Option<&str>,
        start: usize,
        end: usize,
    ) -> Result<Vec<Course>>;

    /// Total number of courses matching `query`
    async fn get_count_by_search(&self, query: Option<&str>) -> Result<usize>;
}
