//! Catalog-specific error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`** / **`EncodeError`**: bincode failures on stored courses
//! - **`ImportError`**: A catalog import file could not be read or parsed
//! - **`InvalidInput`**: A course or query was rejected before touching storage

use thiserror::Error;

/// Catalog-specific errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding course: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding course: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Import file could not be read or parsed
    #[error("Import failed: {0}")]
    ImportError(String),

    /// Invalid query or course data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
