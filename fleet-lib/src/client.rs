//! Main FleetClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::ClientConfig;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// The main client for the fleet booking API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks. All calls go through an injected [`Transport`], so tests can
/// substitute a scripted one.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use fleet_lib::FleetClient;
/// use fleet_lib::api::VehicleQuery;
///
/// # async fn run() -> Result<(), fleet_lib::error::ApiError> {
/// let client = FleetClient::builder()
///     .url("http://localhost:5000/api")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let vehicles = client.list_vehicles(&VehicleQuery::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FleetClient {
    inner: Arc<FleetClientInner>,
}

struct FleetClientInner {
    transport: Arc<dyn Transport>,
}

impl FleetClient {
    /// Creates a client over an explicit transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_transport(Arc::new(transport))
    }

    /// Creates a client over a shared transport.
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(FleetClientInner { transport }),
        }
    }

    /// Creates a new builder for constructing an HTTP client.
    pub fn builder() -> FleetClientBuilder<Missing> {
        FleetClientBuilder::new()
    }

    /// Sends a request and returns the raw unwrapped response.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.inner.transport.send(request).await
    }

    /// Sends a request and deserializes the envelope's `data` into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_value(response.data.clone())
            .map_err(|e| ApiError::parse_with_body(e.to_string(), response.data.to_string()))
    }
}

impl std::fmt::Debug for FleetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetClient").finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an HTTP-backed [`FleetClient`].
///
/// Uses the typestate pattern so `build` is only available once the base URL
/// has been set.
pub struct FleetClientBuilder<Url> {
    url: Url,
    config: ClientConfig,
    http_client: Option<Client>,
}

impl FleetClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            config: ClientConfig::default(),
            http_client: None,
        }
    }

    /// Sets the API base URL.
    pub fn url(self, url: impl Into<String>) -> FleetClientBuilder<Set<String>> {
        FleetClientBuilder {
            url: Set(url.into()),
            config: self.config,
            http_client: self.http_client,
        }
    }

    /// Takes the base URL and timeouts from an existing configuration.
    pub fn config(self, config: ClientConfig) -> FleetClientBuilder<Set<String>> {
        FleetClientBuilder {
            url: Set(config.base_url.clone()),
            config,
            http_client: self.http_client,
        }
    }
}

impl Default for FleetClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> FleetClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl FleetClientBuilder<Set<String>> {
    /// Builds the [`FleetClient`].
    pub fn build(self) -> Result<FleetClient, ApiError> {
        let config = self.config.with_base_url(self.url.0);
        let transport = match self.http_client {
            Some(client) => HttpTransport::with_client(&config, client)?,
            None => HttpTransport::from_config(&config)?,
        };
        Ok(FleetClient::new(transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_from_config() {
        let config = ClientConfig::default().with_base_url("https://fleet.example.com/api");
        assert!(FleetClient::builder().config(config).build().is_ok());
    }

    #[test]
    fn test_builder_with_custom_http_client() {
        let client = FleetClient::builder()
            .url("http://localhost:5000/api")
            .timeout(Duration::from_secs(5))
            .http_client(Client::new())
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = FleetClient::builder()
            .url("not a url")
            .http_client(Client::new())
            .build();
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }
}
