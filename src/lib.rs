//! Swillan - a paginated course catalog browser
//!
//! This library fetches a catalog of courses from a repository (a local sled
//! catalog or a remote HTTP service), filters it by a text query, paginates the
//! filtered result five courses at a time and pads sparse pages with
//! recommended courses.
//!
//! The interesting part lives in [`search`]: the controller that owns the
//! query/page state, runs lookups concurrently and makes sure only the most
//! recently issued load is ever shown.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod navigation;
pub mod repository;
pub mod search;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SwillanError {
    /// Local catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Repository lookup error
    #[error("Repository error: {0}")]
    RepositoryError(#[from] repository::RepositoryError),
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Navigation (location) error
    #[error("Navigation error: {0}")]
    NavigationError(#[from] navigation::NavigationError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Interactive prompt error
    #[error("Prompt error: {0}")]
    PromptError(#[from] ui::InputError),
    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A single course as delivered by a repository
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl Course {
    /// Create a new Course
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            image: image.into(),
            description: description.into(),
        }
    }

    /// Link target of the course card's "Start learning" button
    ///
    /// ```
    /// use swillan::Course;
    /// let course = Course::new("42", "Rust & You", "Ferris", "", "");
    /// assert_eq!(course.preview_href(), "/preview?q=42&title=Rust+%26+You");
    /// ```
    #[must_use]
    pub fn preview_href(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.id)
            .append_pair("title", &self.title)
            .finish();
        format!("/preview?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_href_plain() {
        let course = Course::new("7", "Python", "Guido", "img.png", "Basics");
        assert_eq!(course.preview_href(), "/preview?q=7&title=Python");
    }

    #[test]
    fn test_course_json_defaults() {
        let course: Course =
            serde_json::from_str(r#"{"id":"1","title":"Go","author":"Rob"}"#).unwrap();
        assert!(course.image.is_empty());
        assert!(course.description.is_empty());
    }

    #[test]
    fn test_error_from_invalid_input() {
        let error = SwillanError::InvalidInput("bad page".into());
        assert_eq!(error.to_string(), "Invalid input: bad page");
    }
}
