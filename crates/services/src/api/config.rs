use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the API lives and where pronunciation recordings are served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_url: Url,
    pub media_origin: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Read `ZUBROSLOV_API_URL` and `ZUBROSLOV_SERVER_URL`, falling back to a local server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if either value is not an absolute URL.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_url = non_blank_var("ZUBROSLOV_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let server_url =
            non_blank_var("ZUBROSLOV_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.into());
        Self::new(&api_url, &server_url)
    }

    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if either value is not an absolute URL.
    pub fn new(api_url: &str, server_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            api_url: Url::parse(api_url.trim())?,
            media_origin: Url::parse(server_url.trim())?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an API path such as `words/next`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the joined value does not parse.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.api_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_api_prefix() {
        let config = ApiConfig::new("http://localhost:8000/api", "http://localhost:8000").unwrap();
        assert_eq!(
            config.endpoint("words/next").unwrap().as_str(),
            "http://localhost:8000/api/words/next"
        );
        let trailing = ApiConfig::new("https://example.org/api/", "https://example.org").unwrap();
        assert_eq!(
            trailing.endpoint("/progress/stats").unwrap().as_str(),
            "https://example.org/api/progress/stats"
        );
    }

    #[test]
    fn rejects_relative_urls() {
        assert!(matches!(
            ApiConfig::new("/api", DEFAULT_SERVER_URL),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn defaults_point_at_local_server() {
        let config = ApiConfig::new(DEFAULT_API_URL, DEFAULT_SERVER_URL).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8000/api");
        assert_eq!(config.media_origin.as_str(), "http://localhost:8000/");
    }
}
