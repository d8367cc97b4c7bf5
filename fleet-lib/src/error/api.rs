//! API error types

use std::time::Duration;

use super::ServerFieldError;

/// Message shown when no response was received at all.
pub const NETWORK_MESSAGE: &str =
    "Unable to reach the server. Please check your connection and try again.";

/// Message shown when the request exceeded the transport timeout.
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";

/// Message shown for responses the client could not make sense of.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Errors that can occur during API calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", http_summary(.status, .message))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message supplied by the server, if any.
        message: Option<String>,
        /// Structured field-level validation errors from the server.
        field_errors: Vec<ServerFieldError>,
    },

    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error without a server message.
    pub fn http(status: u16) -> Self {
        Self::Http {
            status,
            message: None,
            field_errors: Vec::new(),
        }
    }

    /// Creates a new HTTP error carrying the server's message.
    pub fn http_with_message(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: Some(message.into()),
            field_errors: Vec::new(),
        }
    }

    /// Attaches server field errors to an HTTP error. Other variants are returned unchanged.
    pub fn with_field_errors(self, errors: Vec<ServerFieldError>) -> Self {
        match self {
            Self::Http {
                status, message, ..
            } => Self::Http {
                status,
                message,
                field_errors: errors,
            },
            other => other,
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server-supplied message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Returns the structured field errors from the server (empty for other variants).
    pub fn field_errors(&self) -> &[ServerFieldError] {
        match self {
            Self::Http { field_errors, .. } => field_errors,
            _ => &[],
        }
    }

    /// Returns `true` if the server rejected the request as conflicting (409).
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }

    /// Returns `true` if no response was received (network failure or timeout).
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Normalizes this error into the text shown to the user.
    ///
    /// A message supplied by the server always wins. Otherwise the text is
    /// chosen by error class, and for HTTP errors by status code.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { status, .. } => self
                .server_message()
                .unwrap_or_else(|| status_message(*status))
                .to_string(),
            Self::Network(_) => NETWORK_MESSAGE.to_string(),
            Self::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
            Self::InvalidUrl(_) | Self::Parse { .. } => UNEXPECTED_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else if err.is_decode() {
            Self::parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Returns the generic message for an HTTP status code.
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request. Please check your input and try again.",
        401 => "Authentication required. Please sign in and try again.",
        403 => "Access denied. You do not have permission to perform this action.",
        404 => "The requested resource was not found.",
        409 => "Conflict: the vehicle is already booked for the selected time slot.",
        422 => "Validation failed. Please review the highlighted fields.",
        429 => "Too many requests. Please wait a moment and try again.",
        500..=599 => "Server error. Please try again later.",
        _ => UNEXPECTED_MESSAGE,
    }
}

fn http_summary<'a>(status: &u16, message: &'a Option<String>) -> &'a str {
    match message.as_deref() {
        Some(message) if !message.trim().is_empty() => message,
        _ => status_message(*status),
    }
}
