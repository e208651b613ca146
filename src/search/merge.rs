//! Result merging and display policy
//!
//! Combines the filtered page with the recommended (unfiltered) page so a
//! results view always has up to [`PAGE_SIZE`] entries, and decides which
//! notices and controls a renderer should show.

use super::state::PAGE_SIZE;
use crate::Course;
use serde::Serialize;
use std::fmt;

/// Everything a renderer needs to draw the result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultState {
    /// Courses matching the query on the current page
    pub visible: Vec<Course>,
    /// Recommended courses padding a short page
    pub fallback: Vec<Course>,
    /// Total number of courses matching the query
    pub total_matches: usize,
    /// `ceil(total_matches / PAGE_SIZE)`
    pub total_pages: usize,
    pub loading: bool,
    /// Message of the last failed load, cleared by the next commit
    pub error: Option<String>,
}

impl ResultState {
    /// Empty state shown while a load is in flight
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            visible: Vec::new(),
            fallback: Vec::new(),
            total_matches: 0,
            total_pages: 0,
            loading: true,
            error: None,
        }
    }

    /// Empty state describing a failed load
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(message.into()),
            ..Self::loading()
        }
    }

    /// Whether page navigation should be offered
    #[must_use]
    pub const fn shows_pagination(&self) -> bool {
        self.total_matches > PAGE_SIZE
    }

    /// Notice to show above the recommended courses, if any
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        if self.loading || self.error.is_some() || self.visible.len() >= PAGE_SIZE {
            return None;
        }
        if self.visible.is_empty() {
            Some(Notice::NoResults)
        } else {
            Some(Notice::NoMoreResults)
        }
    }

    /// Whether the last load failed and can be retried
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

impl Default for ResultState {
    fn default() -> Self {
        Self::loading()
    }
}

/// Notice shown when a page has fewer than [`PAGE_SIZE`] matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notice {
    /// Nothing matched the query
    NoResults,
    /// Some, but fewer than a full page, matched
    NoMoreResults,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults => write!(f, "No courses found. Here are some recommended ones."),
            Self::NoMoreResults => {
                write!(f, "No more courses found. Here are some recommended ones.")
            }
        }
    }
}

/// Number of pages needed for `total_matches` courses
#[must_use]
pub const fn total_pages(total_matches: usize) -> usize {
    total_matches.div_ceil(PAGE_SIZE)
}

/// Merge a filtered page with the recommended page
///
/// Recommended courses only fill the shortfall: a full filtered page gets no
/// fallback at all.
#[must_use]
pub fn merge(filtered: Vec<Course>, defaults: Vec<Course>, total_matches: usize) -> ResultState {
    let shortfall = PAGE_SIZE.saturating_sub(filtered.len());
    let fallback = defaults.into_iter().take(shortfall).collect();

    ResultState {
        visible: filtered,
        fallback,
        total_matches,
        total_pages: total_pages(total_matches),
        loading: false,
        error: None,
    }
}
