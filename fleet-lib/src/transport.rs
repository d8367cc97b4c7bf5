//! Transport seam between the client and the wire
//!
//! Every API call goes through a [`Transport`]. The production implementation
//! is [`HttpTransport`] (reqwest); tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::ClientConfig;
use crate::error::{ApiError, ServerFieldError};

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single API request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base (e.g. `vehicles/available`).
    pub path: String,
    /// Query string parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// Creates a PATCH request with a JSON body.
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, path).with_body(body)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends a query parameter when `value` is present.
    pub fn with_optional_query(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Returns the value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A successful, unwrapped API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Message from the response envelope, if any.
    pub message: Option<String>,
    /// The envelope's `data` payload (`Null` when absent).
    pub data: Value,
}

impl ApiResponse {
    /// Creates a 200 response carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self {
            status: 200,
            message: None,
            data,
        }
    }

    /// Sets the envelope message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Carries one API request to the server.
///
/// Implementations must map every failure to an [`ApiError`]: no response
/// received is `Network`/`Timeout`, a non-success status is `Http` with any
/// server message and field errors attached.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the unwrapped envelope.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Response envelope used by every endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Envelope {
    success: Option<bool>,
    #[serde(alias = "error")]
    message: Option<String>,
    data: Option<Value>,
    errors: Vec<ServerFieldError>,
}

/// Decodes a raw response body into an [`ApiResponse`] or a typed error.
///
/// A 2xx status whose envelope says `success: false` is treated as a
/// rejection with that status. Non-JSON error bodies still produce an `Http`
/// error, without a server message.
pub fn decode_envelope(status: u16, body: &str) -> Result<ApiResponse, ApiError> {
    let is_success = (200..300).contains(&status);

    if !is_success {
        let envelope: Envelope = serde_json::from_str(body).unwrap_or_default();
        return Err(ApiError::Http {
            status,
            message: envelope.message,
            field_errors: envelope.errors,
        });
    }

    if body.trim().is_empty() {
        return Ok(ApiResponse {
            status,
            message: None,
            data: Value::Null,
        });
    }

    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

    if envelope.success == Some(false) {
        return Err(ApiError::Http {
            status,
            message: envelope.message,
            field_errors: envelope.errors,
        });
    }

    Ok(ApiResponse {
        status,
        message: envelope.message,
        data: envelope.data.unwrap_or(Value::Null),
    })
}

/// [`Transport`] over HTTP using reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http_client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport from a client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Self::with_client(config, http_client)
    }

    /// Creates a transport reusing an existing reqwest client.
    pub fn with_client(config: &ClientConfig, http_client: Client) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: normalize_base(&config.base_url)?,
            http_client,
            timeout: config.timeout,
        })
    }

    /// Returns the normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path and query against the base URL.
    pub fn resolve(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(request.path.trim_start_matches('/'))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.resolve(&request)?;
        log::debug!("{} {}", request.method.as_str(), url);

        let mut builder = self
            .http_client
            .request(request.method.into(), url)
            .timeout(self.timeout);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout)
            } else {
                ApiError::from(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::from)?;

        let decoded = decode_envelope(status, &body);
        if let Err(err) = &decoded {
            log::warn!("{} {} failed: {}", request.method.as_str(), request.path, err);
        }
        decoded
    }
}

/// Parses the base URL and guarantees a trailing slash so relative joins keep the path.
fn normalize_base(base: &str) -> Result<Url, ApiError> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidUrl("base URL is empty".to_string()));
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Ok(Url::parse(&with_slash)?)
}
