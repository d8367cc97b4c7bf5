//! The per-form contract consumed by [`FormController`](super::FormController).

use std::time::Duration;

use async_trait::async_trait;
use fleet_lib::FleetClient;
use fleet_lib::error::ApiError;

use crate::validation::{FormState, RuleSet};

/// How long the success banner shows before the form resets.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2000);

/// A form: its rules, its request, and how it talks to the API.
#[async_trait]
pub trait Form: Send + Sync {
    /// Typed request built from a validated form state.
    type Request: Send + 'static;
    /// What a successful submit returns.
    type Output: Send;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The form's validation rules.
    fn rules(&self) -> &RuleSet;

    /// Values the form starts with and resets to.
    fn initial_state(&self) -> FormState {
        FormState::new()
    }

    /// Domain-level check run after validation passes, e.g. "destination
    /// must differ from pickup". Returns the rejection message.
    fn domain_check(&self, _state: &FormState) -> Option<String> {
        None
    }

    /// Builds the request from a state that passed validation.
    fn build_request(&self, state: &FormState) -> Result<Self::Request, String>;

    /// Sends the request.
    async fn send(&self, client: &FleetClient, request: Self::Request) -> Result<Self::Output, ApiError>;

    /// Message for the success notification.
    fn success_message(&self, output: &Self::Output) -> String;

    /// How long to show success before resetting, or `None` to return to
    /// `Idle` immediately and keep the values.
    fn success_display(&self) -> Option<Duration> {
        Some(DEFAULT_RESET_DELAY)
    }

    /// Whether inputs are read-only while submitting.
    fn locks_inputs(&self) -> bool {
        false
    }
}
