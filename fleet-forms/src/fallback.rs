//! Panic containment for the outer shell.
//!
//! [`contain`] runs a unit of work and turns a panic into a [`FallbackReport`]
//! the shell can render in place of a crash. Panic details are only exposed
//! in development builds.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Generic title shown for any contained failure.
pub const FALLBACK_TITLE: &str = "Something went wrong";

/// Generic explanation shown for any contained failure.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Reload to try again or go back home.";

/// Whether panic details may be shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// `Development` for debug builds, `Production` otherwise.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }
}

/// What the user can do from the fallback view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Retry the failed view from scratch.
    Reload,
    /// Navigate back to the home view.
    GoHome,
}

impl RecoveryAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reload => "Reload",
            Self::GoHome => "Go home",
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contained failure, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{title}")]
pub struct FallbackReport {
    pub title: String,
    pub message: String,
    /// The panic message, present only in development mode.
    pub detail: Option<String>,
    pub actions: Vec<RecoveryAction>,
}

impl FallbackReport {
    /// Builds the report for a caught panic payload.
    pub fn from_panic(mode: BuildMode, panic: &(dyn Any + Send)) -> Self {
        let message = extract_panic_message(panic);
        log::error!("contained panic: {}", message);
        Self {
            title: FALLBACK_TITLE.to_string(),
            message: FALLBACK_MESSAGE.to_string(),
            detail: mode.is_development().then_some(message),
            actions: vec![RecoveryAction::Reload, RecoveryAction::GoHome],
        }
    }
}

/// Runs `f`, converting a panic into a [`FallbackReport`].
pub fn contain<T>(mode: BuildMode, f: impl FnOnce() -> T) -> Result<T, FallbackReport> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|panic| FallbackReport::from_panic(mode, &*panic))
}

/// Extract a message from a panic payload.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
