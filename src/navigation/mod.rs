//! Navigation context
//!
//! The search controller mirrors its query and page into an addressable
//! location (a URL query string) so a session can be shared or resumed. The
//! location is read once, at startup, and rewritten on every load.

use crate::search::state::{normalize_page, normalize_query};
use thiserror::Error;
use url::Url;

/// Query-string key holding the search text
pub const QUERY_PARAM: &str = "q";
/// Query-string key holding the page number
pub const PAGE_PARAM: &str = "page";

/// Navigation errors
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Location could not be parsed as a URL
    #[error("Invalid location '{location}': {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },
}

/// Query and page as read back from a location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationParams {
    pub query: Option<String>,
    pub page: Option<u32>,
}

/// Persistence of the current search into an addressable location
pub trait Navigator: Send {
    /// Parameters present when the session started
    fn read_initial(&self) -> LocationParams;

    /// Replace the persisted query and page
    fn write(&mut self, query: Option<&str>, page: u32);

    /// Current location as text
    fn current(&self) -> String;
}

/// Navigator that keeps state in a URL's query string
///
/// Unrelated query parameters are preserved.
///
/// ```
/// use swillan::navigation::{Navigator, UrlNavigator};
/// let mut nav = UrlNavigator::parse("https://swillan.dev/search?q=rust&page=2").unwrap();
/// assert_eq!(nav.read_initial().page, Some(2));
///
/// nav.write(None, 1);
/// assert_eq!(nav.location().as_str(), "https://swillan.dev/search?page=1");
/// ```
#[derive(Debug, Clone)]
pub struct UrlNavigator {
    location: Url,
    initial: LocationParams,
}

impl UrlNavigator {
    /// Start from an existing URL
    #[must_use]
    pub fn new(location: Url) -> Self {
        let initial = read_params(&location);
        Self { location, initial }
    }

    /// Parse a location string
    ///
    /// A bare query string (`?q=rust&page=2`) is resolved against
    /// [`UrlNavigator::DEFAULT_LOCATION`].
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::InvalidLocation` if the string is not a URL.
    pub fn parse(location: &str) -> Result<Self, NavigationError> {
        let invalid = |source| NavigationError::InvalidLocation {
            location: location.to_string(),
            source,
        };

        let url = match Url::parse(location) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(Self::DEFAULT_LOCATION)
                .and_then(|base| base.join(location))
                .map_err(invalid)?,
            Err(e) => return Err(invalid(e)),
        };

        Ok(Self::new(url))
    }

    /// Location used when none is given
    pub const DEFAULT_LOCATION: &'static str = "swillan://courses/search";

    /// Current location
    #[must_use]
    pub const fn location(&self) -> &Url {
        &self.location
    }
}

impl Default for UrlNavigator {
    fn default() -> Self {
        let location =
            Url::parse(Self::DEFAULT_LOCATION).expect("DEFAULT_LOCATION is a valid URL");
        Self::new(location)
    }
}

impl Navigator for UrlNavigator {
    fn read_initial(&self) -> LocationParams {
        self.initial.clone()
    }

    fn write(&mut self, query: Option<&str>, page: u32) {
        let kept: Vec<(String, String)> = self
            .location
            .query_pairs()
            .filter(|(k, _)| k != QUERY_PARAM && k != PAGE_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let query = query.and_then(normalize_query);
        let mut pairs = self.location.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept);
        if let Some(q) = &query {
            pairs.append_pair(QUERY_PARAM, q);
        }
        pairs.append_pair(PAGE_PARAM, &normalize_page(page).to_string());
        drop(pairs);

        tracing::trace!(location = %self.location, "navigation updated");
    }

    fn current(&self) -> String {
        self.location.to_string()
    }
}

fn read_params(url: &Url) -> LocationParams {
    let mut params = LocationParams::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            QUERY_PARAM => params.query = normalize_query(&value),
            PAGE_PARAM => params.page = value.trim().parse::<u32>().ok().map(normalize_page),
            _ => {}
        }
    }
    params
}
