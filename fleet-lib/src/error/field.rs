//! Field-level validation errors reported by the server

use serde::Deserialize;

/// A single field error from a server validation response.
///
/// The server reports these as `{ "path": "capacityKg", "message": "..." }`
/// entries in the `errors` array of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerFieldError {
    /// Field path as named by the server (matches the form field name).
    #[serde(alias = "field", alias = "param")]
    pub path: String,
    /// Human-readable validation error message.
    #[serde(alias = "msg")]
    pub message: String,
}

impl ServerFieldError {
    /// Creates a new server field error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ServerFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
