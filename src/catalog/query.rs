//! Query matching for the local catalog
//!
//! A query is matched literally and case-insensitively against a course's
//! title, author and description. No query matches everything.

use super::CatalogError;
use crate::Course;
use regex::{Regex, RegexBuilder};

/// Compiled course matcher
#[derive(Debug, Clone)]
pub enum CourseMatcher {
    /// Matches every course
    All,
    /// Matches courses containing the pattern
    Pattern(Regex),
}

impl CourseMatcher {
    /// Build a matcher for an optional query
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` if the escaped query still fails to
    /// compile (e.g. it exceeds the regex size limit).
    pub fn new(query: Option<&str>) -> Result<Self, CatalogError> {
        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return Ok(Self::All);
        };

        RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map(Self::Pattern)
            .map_err(|e| CatalogError::InvalidInput(format!("Invalid query '{query}': {e}")))
    }

    /// Whether `course` matches
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        match self {
            Self::All => true,
            Self::Pattern(re) => {
                re.is_match(&course.title)
                    || re.is_match(&course.author)
                    || re.is_match(&course.description)
            }
        }
    }
}
