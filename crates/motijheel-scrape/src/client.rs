//! HTTP page source with a browser identity.

use crate::extract::{SOURCE_URL, ScrapeError};
use async_trait::async_trait;
use std::time::Duration;

/// User-Agent presented to the source. A browser identity reduces the
/// chance of the request being blocked.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for fetching the source page.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Page URL to fetch.
    pub url: String,
    /// User-Agent header value sent with every request.
    pub user_agent: String,
    /// Navigation timeout for the whole page request.
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: SOURCE_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Source of raw page markup. The seam that lets tests supply fixture
/// pages instead of hitting the network.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the full page markup.
    async fn fetch_page(&self) -> Result<String, ScrapeError>;
}

/// Production page source over a pooled reqwest client.
///
/// Connections are returned to the pool when the response body has been
/// read, on success and failure alike.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    config: ScrapeConfig,
}

impl HttpPageSource {
    /// Creates a page source with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(60))
            .gzip(true)
            .build()
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Creates a page source with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self, ScrapeError> {
        Self::new(ScrapeConfig::default())
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ScrapeConfig {
        &self.config
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScrapeConfig::default();
        assert_eq!(config.url, SOURCE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_client_creation() {
        assert!(HttpPageSource::with_defaults().is_ok());
    }
}
