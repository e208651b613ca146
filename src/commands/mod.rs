//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the configured course repository.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod search;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use catalog::execute as catalog;
pub use self::config::execute as config;
pub use search::execute as search;

use crate::{
    SwillanError,
    catalog::Catalog,
    config::{Source, SwillanConfig},
    repository::{CourseRepository, HttpRepository},
};
use std::sync::Arc;
use tracing::info;

type Result<T> = std::result::Result<T, SwillanError>;

/// Open the repository courses are read from
///
/// `url` overrides the configured source with a remote service.
///
/// # Errors
///
/// Returns `SwillanError` if the catalog cannot be opened, the service URL is
/// missing or invalid, or the HTTP client cannot be built.
pub fn open_repository(
    config: &SwillanConfig,
    url: Option<&str>,
) -> Result<Arc<dyn CourseRepository>> {
    let base_url = match (url, config.source) {
        (Some(url), _) => Some(url),
        (None, Source::Http) => Some(config.base_url.as_deref().ok_or_else(|| {
            SwillanError::InvalidInput(
                "source is 'http' but base_url is unset (swillan config set base_url <URL>)".into(),
            )
        })?),
        (None, Source::Catalog) => None,
    };

    if let Some(base_url) = base_url {
        info!(base_url, "using remote course service");
        let repository = HttpRepository::new(base_url, config.lookup_timeout())?;
        return Ok(Arc::new(repository));
    }

    let path = config.catalog_path()?;
    info!(path = %path.display(), "using local catalog");
    Ok(Arc::new(Catalog::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_requires_base_url() {
        let config = SwillanConfig {
            source: Source::Http,
            ..SwillanConfig::default()
        };
        assert!(matches!(
            open_repository(&config, None),
            Err(SwillanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_url_overrides_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = SwillanConfig {
            catalog_path: Some(dir.path().join("catalog")),
            ..SwillanConfig::default()
        };
        assert!(open_repository(&config, Some("http://localhost:9/api")).is_ok());
        assert!(!dir.path().join("catalog").exists());
    }

    #[test]
    fn test_catalog_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = SwillanConfig {
            catalog_path: Some(dir.path().join("catalog")),
            ..SwillanConfig::default()
        };
        assert!(open_repository(&config, None).is_ok());
        assert!(dir.path().join("catalog").exists());
    }

    #[test]
    fn test_invalid_url() {
        let config = SwillanConfig::default();
        assert!(matches!(
            open_repository(&config, Some("not a url")),
            Err(SwillanError::RepositoryError(_))
        ));
    }
}
