//! Local course catalog
//!
//! Stores courses in a sled tree keyed by course id, with bincode-encoded
//! values. Iteration order (and therefore paging order) is ascending id.
//!
//! The catalog implements [`CourseRepository`], so the search controller can
//! browse it exactly like a remote service.

use crate::Course;
use crate::repository::{self, CourseRepository, RepositoryError};
use async_trait::async_trait;
use sled::{Db, Tree};
use std::fs;
use std::path::Path;

pub mod error;
pub mod query;

pub use error::CatalogError;
pub use query::CourseMatcher;

/// Catalog wrapper that encapsulates all storage operations
///
/// Clones share the same underlying database.
#[derive(Clone)]
pub struct Catalog {
    db: Db,
    courses: Tree, // id -> Course
}

impl Catalog {
    /// Opens or creates a catalog at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use swillan::catalog::Catalog;
    /// let catalog = Catalog::open("my_catalog").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Opens a throwaway catalog that is removed when dropped
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if sled cannot create the temporary database.
    pub fn temporary() -> Result<Self, CatalogError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self, CatalogError> {
        let courses = db.open_tree("courses")?;
        Ok(Self { db, courses })
    }

    /// Insert or replace a course
    ///
    /// Returns `true` if a course with the same id was replaced.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the id is blank, encoding fails, or the write fails.
    pub fn insert(&self, course: &Course) -> Result<bool, CatalogError> {
        if course.id.trim().is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "Course '{}' has an empty id",
                course.title
            )));
        }

        let value = bincode::encode_to_vec(course, bincode::config::standard())?;
        Ok(self.courses.insert(course.id.as_bytes(), value)?.is_some())
    }

    /// Insert many courses, returning how many were written
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failing insert.
    pub fn insert_many<'c, I>(&self, courses: I) -> Result<usize, CatalogError>
    where
        I: IntoIterator<Item = &'c Course>,
    {
        let mut written = 0;
        for course in courses {
            self.insert(course)?;
            written += 1;
        }
        self.db.flush()?;
        Ok(written)
    }

    /// Import a JSON array of courses from a file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ImportError` if the file cannot be read or is not a
    /// JSON array of courses, or any insert error.
    pub fn import_json<P: AsRef<Path>>(&self, path: P) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| CatalogError::ImportError(format!("{}: {e}", path.display())))?;
        let courses: Vec<Course> = serde_json::from_str(&raw)
            .map_err(|e| CatalogError::ImportError(format!("{}: {e}", path.display())))?;

        self.insert_many(&courses)
    }

    /// Get a course by id
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the read or decoding fails.
    pub fn get(&self, id: &str) -> Result<Option<Course>, CatalogError> {
        match self.courses.get(id.as_bytes())? {
            Some(value) => Ok(Some(decode(&value)?)),
            None => Ok(None),
        }
    }

    /// Remove a course by id, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the write fails.
    pub fn remove(&self, id: &str) -> Result<bool, CatalogError> {
        Ok(self.courses.remove(id.as_bytes())?.is_some())
    }

    /// All courses in id order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if iteration or decoding fails.
    pub fn list_all(&self) -> Result<Vec<Course>, CatalogError> {
        self.matching(&CourseMatcher::All, 0, usize::MAX)
    }

    /// Number of stored courses
    #[must_use]
    pub fn count(&self) -> usize {
        self.courses.len()
    }

    /// Remove every course
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the clear or flush fails.
    pub fn clear(&self) -> Result<(), CatalogError> {
        self.courses.clear()?;
        self.db.flush()?;
        Ok(())
    }

    /// Courses accepted by `matcher`, sliced to `start..end`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if iteration or decoding fails.
    pub fn matching(
        &self,
        matcher: &CourseMatcher,
        start: usize,
        end: usize,
    ) -> Result<Vec<Course>, CatalogError> {
        let mut found = Vec::new();
        let mut seen = 0usize;

        for entry in &self.courses {
            if seen >= end {
                break;
            }
            let (_, value) = entry?;
            let course = decode(&value)?;
            if !matcher.matches(&course) {
                continue;
            }
            if seen >= start {
                found.push(course);
            }
            seen += 1;
        }

        Ok(found)
    }

    /// Number of courses accepted by `matcher`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if iteration or decoding fails.
    pub fn count_matching(&self, matcher: &CourseMatcher) -> Result<usize, CatalogError> {
        if matches!(matcher, CourseMatcher::All) {
            return Ok(self.count());
        }

        let mut total = 0;
        for entry in &self.courses {
            let (_, value) = entry?;
            if matcher.matches(&decode(&value)?) {
                total += 1;
            }
        }
        Ok(total)
    }
}

fn decode(value: &[u8]) -> Result<Course, CatalogError> {
    let (course, _): (Course, usize) =
        bincode::decode_from_slice(value, bincode::config::standard())?;
    Ok(course)
}

impl Catalog {
    /// Run a catalog read on the blocking pool
    async fn read<T, F>(&self, f: F) -> repository::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, CatalogError> + Send + 'static,
    {
        let catalog = self.clone();
        let read = tokio::task::spawn_blocking(move || f(&catalog))
            .await
            .map_err(|e| RepositoryError::Other(format!("Catalog read aborted: {e}")))?;
        Ok(read?)
    }
}

#[async_trait]
impl CourseRepository for Catalog {
    async fn get_range(&self, start: usize, end: usize) -> repository::Result<Vec<Course>> {
        self.read(move |catalog| catalog.matching(&CourseMatcher::All, start, end)).await
    }

    async fn get_range_by_search(
        &self,
        query: Option<&str>,
        start: usize,
        end: usize,
    ) -> repository::Result<Vec<Course>> {
        let matcher = CourseMatcher::new(query)?;
        self.read(move |catalog| catalog.matching(&matcher, start, end)).await
    }

    async fn get_count_by_search(&self, query: Option<&str>) -> repository::Result<usize> {
        let matcher = CourseMatcher::new(query)?;
        self.read(move |catalog| catalog.count_matching(&matcher)).await
    }
}
