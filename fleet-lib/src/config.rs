//! Client configuration

use std::env;
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "FLEET_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const ENV_API_TIMEOUT: &str = "FLEET_API_TIMEOUT_SECS";

/// Configuration for the API client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fleet_lib::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://fleet.example.com/api")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the booking API.
    ///
    /// Default: `http://localhost:5000/api`
    pub base_url: String,

    /// Timeout for a whole request.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Timeout for establishing the connection.
    ///
    /// Default: 10 seconds
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from the defaults overlaid with `FLEET_API_URL` and
    /// `FLEET_API_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Applies environment overrides on top of this config.
    ///
    /// Unparseable or zero timeout values are ignored with a warning.
    pub fn overlay_env(mut self) -> Self {
        if let Ok(url) = env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(raw) = env::var(ENV_API_TIMEOUT) {
            match parse_timeout_secs(&raw) {
                Some(timeout) => self.timeout = timeout,
                None => log::warn!("ignoring invalid {}={:?}", ENV_API_TIMEOUT, raw),
            }
        }
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Parses a timeout given in whole seconds. Zero is rejected: every request
/// would time out immediately.
fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}
