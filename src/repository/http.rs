//! Remote course repository over HTTP
//!
//! Talks to a JSON service exposing three endpoints relative to a base URL:
//!
//! ```text
//! GET courses?start=0&end=5               -> [Course, ...]
//! GET courses/search?q=rust&start=0&end=5 -> [Course, ...]
//! GET courses/count?q=rust                -> {"count": 12}
//! ```
//!
//! The `q` parameter is omitted for an unfiltered query.

use super::{CourseRepository, RepositoryError, Result};
use crate::Course;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("swillan/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: usize,
}

/// Course repository backed by a remote JSON service
pub struct HttpRepository {
    http: Client,
    base: Url,
}

impl HttpRepository {
    /// Create a client for the service at `base_url`
    ///
    /// A `timeout` of `None` leaves requests unbounded at this layer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base,
        })
    }

    /// Base URL every endpoint is resolved against
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Build the URL of `endpoint` with the given query parameters
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidUrl` if the endpoint cannot be joined.
    pub fn endpoint(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base.join(endpoint)?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::trace!(%url, "repository request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.json().await?)
    }
}

fn range_params(query: Option<&str>, start: usize, end: usize) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(3);
    if let Some(q) = query {
        params.push(("q", q.to_string()));
    }
    params.push(("start", start.to_string()));
    params.push(("end", end.to_string()));
    params
}

#[async_trait]
impl CourseRepository for HttpRepository {
    async fn get_range(&self, start: usize, end: usize) -> Result<Vec<Course>> {
        let url = self.endpoint("courses", &range_params(None, start, end))?;
        self.fetch(url).await
    }

    async fn get_range_by_search(
        &self,
        query: Option<&str>,
        start: usize,
        end: usize,
    ) -> Result<Vec<Course>> {
        let url = self.endpoint("courses/search", &range_params(query, start, end))?;
        self.fetch(url).await
    }

    async fn get_count_by_search(&self, query: Option<&str>) -> Result<usize> {
        let params: Vec<_> = query.map(|q| ("q", q.to_string())).into_iter().collect();
        let url = self.endpoint("courses/count", &params)?;
        let response: CountResponse = self.fetch(url).await?;
        Ok(response.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_gets_trailing_slash() {
        let repo = HttpRepository::new("https://example.com/api", None).unwrap();
        assert_eq!(repo.base().as_str(), "https://example.com/api/");
    }

    #[test]
    fn test_search_endpoint() {
        let repo = HttpRepository::new("https://example.com/api/", None).unwrap();
        let url = repo
            .endpoint("courses/search", &range_params(Some("web dev"), 5, 10))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/courses/search?q=web+dev&start=5&end=10"
        );
    }

    #[test]
    fn test_unfiltered_range_has_no_query() {
        let repo = HttpRepository::new("http://localhost:8080", None).unwrap();
        let url = repo.endpoint("courses", &range_params(None, 0, 5)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/courses?start=0&end=5");
    }

    #[test]
    fn test_count_without_params() {
        let repo = HttpRepository::new("http://localhost:8080", None).unwrap();
        let url = repo.endpoint("courses/count", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/courses/count");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpRepository::new("not a url", None);
        assert!(matches!(result, Err(RepositoryError::InvalidUrl(_))));
    }
}
