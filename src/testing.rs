//! Testing utilities for swillan
//!
//! This module provides helper types for writing tests:
//!
//! - `TestCatalog`: a sled catalog in a temporary directory
//! - `ScriptedRepository`: an in-memory repository whose lookups can be held
//!   back (to force out-of-order settlement) or made to fail
//! - `courses` / `titled`: course fixtures
//!
//! Only available when compiled with `cfg(test)`.

use crate::Course;
use crate::catalog::{Catalog, CourseMatcher};
use crate::repository::{self, CourseRepository, RepositoryError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;
use tokio::sync::watch;

/// `n` courses with ids `{prefix}0..{prefix}{n-1}` and titles `Title {id}`
pub fn courses(prefix: &str, n: usize) -> Vec<Course> {
    (0..n)
        .map(|i| {
            let id = format!("{prefix}{i}");
            Course::new(
                id.clone(),
                format!("Title {id}"),
                "Author",
                format!("{id}.png"),
                format!("Description of {id}"),
            )
        })
        .collect()
}

/// Courses whose id and title are both the given string
pub fn titled(titles: &[&str]) -> Vec<Course> {
    titles
        .iter()
        .map(|t| Course::new(*t, *t, "Author", "", ""))
        .collect()
}

/// Wrapper for a temporary catalog that is removed on drop
pub struct TestCatalog {
    dir: TempDir,
    catalog: Catalog,
}

impl TestCatalog {
    /// Create an empty catalog in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or catalog cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let catalog =
            Catalog::open(dir.path().join("catalog")).expect("Failed to open test catalog");
        Self { dir, catalog }
    }

    /// Create a catalog pre-filled with `courses`
    ///
    /// # Panics
    /// Panics if inserting fails.
    pub fn with_courses(courses: &[Course]) -> Self {
        let test_catalog = Self::new();
        test_catalog
            .catalog
            .insert_many(courses)
            .expect("Failed to fill test catalog");
        test_catalog
    }

    /// Get a reference to the underlying catalog
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Directory holding the catalog
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Manually released barrier for a scripted lookup
#[derive(Clone)]
pub struct Gate {
    tx: watch::Sender<bool>,
}

impl Gate {
    fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Let every waiting and future lookup through
    pub fn open(&self) {
        self.tx.send_replace(true);
    }

    async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

/// In-memory repository with scriptable timing and failures
///
/// Queries match the same way the sled catalog does. Filtered and count
/// lookups for a gated query wait until the gate is opened; lookups for a
/// failing query return an error once they pass their gate.
pub struct ScriptedRepository {
    courses: Vec<Course>,
    gates: Mutex<HashMap<String, Gate>>,
    failing: Mutex<HashSet<String>>,
}

impl ScriptedRepository {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            gates: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Hold back filtered and count lookups for `query` until the gate opens
    pub fn gate(&self, query: &str) -> Gate {
        let gate = Gate::new();
        self.gates.lock().unwrap().insert(query.to_string(), gate.clone());
        gate
    }

    /// Make lookups for `query` fail
    pub fn fail(&self, query: &str) {
        self.failing.lock().unwrap().insert(query.to_string());
    }

    /// Make lookups for `query` succeed again
    pub fn heal(&self, query: &str) {
        self.failing.lock().unwrap().remove(query);
    }

    async fn pass(&self, query: Option<&str>) -> repository::Result<CourseMatcher> {
        let key = query.unwrap_or_default();
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        if self.failing.lock().unwrap().contains(key) {
            return Err(RepositoryError::Other(format!("scripted failure for '{key}'")));
        }
        Ok(CourseMatcher::new(query)?)
    }

    fn filtered(&self, matcher: &CourseMatcher) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(move |c| matcher.matches(c))
    }
}

#[async_trait]
impl CourseRepository for ScriptedRepository {
    async fn get_range(&self, start: usize, end: usize) -> repository::Result<Vec<Course>> {
        Ok(self
            .courses
            .iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .cloned()
            .collect())
    }

    async fn get_range_by_search(
        &self,
        query: Option<&str>,
        start: usize,
        end: usize,
    ) -> repository::Result<Vec<Course>> {
        let matcher = self.pass(query).await?;
        Ok(self
            .filtered(&matcher)
            .skip(start)
            .take(end.saturating_sub(start))
            .cloned()
            .collect())
    }

    async fn get_count_by_search(&self, query: Option<&str>) -> repository::Result<usize> {
        let matcher = self.pass(query).await?;
        Ok(self.filtered(&matcher).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_basic() {
        let test_catalog = TestCatalog::new();
        assert_eq!(test_catalog.catalog().count(), 0);
        assert!(test_catalog.path().exists());
    }

    #[test]
    fn test_catalog_with_courses() {
        let test_catalog = TestCatalog::with_courses(&courses("x", 4));
        assert_eq!(test_catalog.catalog().count(), 4);
    }

    #[test]
    fn test_fixtures() {
        let list = courses("p", 2);
        assert_eq!(list[1].id, "p1");
        assert_eq!(list[1].title, "Title p1");
        assert_eq!(titled(&["a"])[0].id, "a");
    }

    #[tokio::test]
    async fn test_scripted_failure_and_heal() {
        let repo = ScriptedRepository::new(courses("c", 3));
        repo.fail("x");
        assert!(repo.get_range_by_search(Some("x"), 0, 5).await.is_err());
        assert!(repo.get_count_by_search(Some("x")).await.is_err());

        repo.heal("x");
        assert!(repo.get_range_by_search(Some("x"), 0, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gate_releases_lookup() {
        let repo = ScriptedRepository::new(courses("c", 3));
        let gate = repo.gate("title");

        let (found, ()) = tokio::join!(repo.get_range_by_search(Some("title"), 0, 5), async {
            gate.open();
        });
        assert_eq!(found.unwrap().len(), 3);
    }
}
