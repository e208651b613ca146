//! Search-specific error and outcome types
//!
//! A load either commits its result, is discarded because a newer load was
//! issued while it was in flight, or fails. Only the last is an error: a
//! discarded load is a normal outcome and never reaches the user.

use crate::repository::RepositoryError;
use thiserror::Error;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// A repository lookup of the current load failed
    #[error("Lookup failed: {0}")]
    Lookup(#[from] RepositoryError),
}

/// How a load that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The load was the most recent one and its result is now visible
    Committed { generation: u64 },
    /// A newer load was issued before this one settled; its result was dropped
    Discarded { generation: u64, superseded_by: u64 },
}

impl LoadOutcome {
    /// Whether the load's result became visible
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Generation token the load was issued with
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Committed { generation } | Self::Discarded { generation, .. } => *generation,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
