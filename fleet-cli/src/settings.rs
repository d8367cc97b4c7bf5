//! Settings file and its layering over the client configuration.
//!
//! Precedence, lowest first: built-in defaults, `settings.json`, environment
//! variables, command-line flags.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use fleet_lib::ClientConfig;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::error::CliError;
use crate::paths;

/// Contents of `settings.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// Base URL of the booking API.
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: Option<String>,
}

impl CliSettings {
    /// Loads settings from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text).map_err(|source| CliError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from the platform config directory.
    pub fn load_default() -> Result<Self, CliError> {
        match paths::settings_file() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Applies the file layer to the default client configuration.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone());
        }
        let timeout = self.timeout_secs.and_then(|secs| nonzero_timeout(secs, "settings file"));
        if let Some(timeout) = timeout {
            config = config.with_timeout(timeout);
        }
        config
    }

    /// Log level from the file, `Info` if unset. `verbose` forces `Debug`.
    pub fn log_level(&self, verbose: bool) -> Result<LevelFilter, CliError> {
        if verbose {
            return Ok(LevelFilter::Debug);
        }
        match &self.log_level {
            Some(level) => {
                LevelFilter::from_str(level).map_err(|_| CliError::LogLevel(level.clone()))
            }
            None => Ok(LevelFilter::Info),
        }
    }
}

/// Overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Builds the effective client configuration: file, then environment, then flags.
pub fn resolve_config(settings: &CliSettings, overrides: &Overrides) -> ClientConfig {
    let mut config = settings.client_config().overlay_env();
    if let Some(url) = &overrides.api_url {
        config = config.with_base_url(url.clone());
    }
    let timeout = overrides.timeout_secs.and_then(|secs| nonzero_timeout(secs, "--timeout"));
    if let Some(timeout) = timeout {
        config = config.with_timeout(timeout);
    }
    config
}

/// A zero timeout would fail every request, so it is ignored with a warning.
fn nonzero_timeout(secs: u64, source: &str) -> Option<Duration> {
    if secs == 0 {
        log::warn!("ignoring zero timeout from {}", source);
        return None;
    }
    Some(Duration::from_secs(secs))
}
