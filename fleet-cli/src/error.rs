//! CLI error type

use std::path::PathBuf;

use fleet_forms::list::ListError;
use fleet_forms::submission::Rejection;
use fleet_lib::error::ApiError;

/// Errors that end a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read settings from {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid log level '{0}'")]
    LogLevel(String),

    #[error("Failed to initialize logger: {0}")]
    Logger(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Submission rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("{0}")]
    List(#[from] ListError),

    #[error("No {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },
}
