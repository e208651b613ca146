//! Repository-specific error types
//!
//! Any of these surfaces to the search controller as a lookup failure.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by course lookups
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Local catalog failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    /// Transport-level HTTP failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Base URL could not be joined with an endpoint path
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Lookup did not settle in time
    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),

    /// Anything else
    #[error("{0}")]
    Other(String),
}
