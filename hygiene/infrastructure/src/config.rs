use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://api.ratings.food.gov.uk";
pub const DEFAULT_API_VERSION: u32 = 2;

/// Connection settings for the rating authority API.
///
/// Some local authorities take a long time to answer, so the timeouts are
/// deliberately generous.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    /// Sent as `X-API-Version` on every request. The API returns no data without it.
    pub api_version: u32,
    /// Maximum wait for the response once the request has been sent.
    ///
    /// Applied as the client's read timeout: it bounds each idle gap while
    /// reading the response, not the total time until the headers arrive.
    pub header_timeout: Duration,
    /// Maximum time to establish the connection. Covers the TLS handshake as
    /// well as the TCP connect.
    pub connect_timeout: Duration,
    pub keep_alive: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub proxy_from_env: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION,
            header_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(25),
            keep_alive: Duration::from_secs(30),
            proxy_from_env: true,
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.api_version == 0 {
            return Err(ConfigError::InvalidApiVersion);
        }
        if self.header_timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("API version must be greater than zero")]
    InvalidApiVersion,

    #[error("Timeouts must be greater than zero")]
    InvalidTimeout,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}
