//! Query and page state
//!
//! Holds the current search text and page, and derives the catalog offsets the
//! next lookup will use. Offsets are always recomputed together from the page,
//! never set independently.

use serde::Serialize;

/// Number of courses shown per page
pub const PAGE_SIZE: usize = 5;

/// Half-open range of catalog offsets `[start, end)` for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBounds {
    pub start: usize,
    pub end: usize,
}

impl PageBounds {
    /// Bounds of the given page (pages start at 1; 0 is treated as 1)
    ///
    /// ```
    /// use swillan::search::state::PageBounds;
    /// let bounds = PageBounds::for_page(3);
    /// assert_eq!((bounds.start, bounds.end), (10, 15));
    /// ```
    #[must_use]
    pub const fn for_page(page: u32) -> Self {
        let page = normalize_page(page) as usize;
        let start = (page - 1) * PAGE_SIZE;
        Self {
            start,
            end: start + PAGE_SIZE,
        }
    }
}

/// Clamp a page number to the first page
#[must_use]
pub const fn normalize_page(page: u32) -> u32 {
    if page == 0 { 1 } else { page }
}

/// Normalize a raw query: surrounding whitespace is dropped and a blank
/// query means "no filter"
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Current query, page and the offsets derived from the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    query: Option<String>,
    page: u32,
    bounds: PageBounds,
}

impl SearchState {
    /// State for the first page with no filter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: None,
            page: 1,
            bounds: PageBounds::for_page(1),
        }
    }

    /// Set the page and recompute the offsets, returning them
    pub const fn set_page(&mut self, page: u32) -> PageBounds {
        self.page = normalize_page(page);
        self.bounds = PageBounds::for_page(self.page);
        self.bounds
    }

    /// Set the query; blank input clears the filter
    pub fn set_query(&mut self, query: &str) {
        self.query = normalize_query(query);
    }

    /// Current query, `None` when unfiltered
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Current query as a string, empty when unfiltered
    #[must_use]
    pub fn query_str(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    /// Current page (1-based)
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Offsets of the current page
    #[must_use]
    pub const fn bounds(&self) -> PageBounds {
        self.bounds
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_for_every_page() {
        for page in 1..=50u32 {
            let bounds = PageBounds::for_page(page);
            assert_eq!(bounds.start, (page as usize - 1) * PAGE_SIZE);
            assert_eq!(bounds.end, bounds.start + PAGE_SIZE);
        }
    }

    #[test]
    fn test_page_zero_is_first_page() {
        assert_eq!(PageBounds::for_page(0), PageBounds::for_page(1));

        let mut state = SearchState::new();
        state.set_page(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_set_page_commits_bounds_together() {
        let mut state = SearchState::new();
        let returned = state.set_page(4);

        assert_eq!(state.page(), 4);
        assert_eq!(returned, state.bounds());
        assert_eq!(state.bounds(), PageBounds { start: 15, end: 20 });
    }

    #[test]
    fn test_blank_query_means_no_filter() {
        let mut state = SearchState::new();
        state.set_query("python");
        assert_eq!(state.query(), Some("python"));

        state.set_query("   ");
        assert_eq!(state.query(), None);
        assert_eq!(state.query_str(), "");
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(normalize_query("  rust  "), Some("rust".to_string()));
        assert_eq!(normalize_query(""), None);
    }
}
