//! Per-form controller sequencing validation, one request, and UI state.

use std::time::Duration;

use fleet_lib::FleetClient;
use fleet_lib::error::ApiError;
use tokio::time::Instant;

use super::{Form, SubmissionState};
use crate::toast::{Toast, ToastQueue};
use crate::validation::{FieldErrors, FieldValue, FormState, validate};

/// Aggregate notification for a submit blocked by client validation.
pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form";

/// Why a submit did not reach the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// A submit is already in flight, or the success banner is showing.
    #[error("form is busy ({0:?})")]
    Busy(SubmissionState),
    /// Client validation failed.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),
    /// The domain check failed.
    #[error("{0}")]
    Domain(String),
    /// A validated state could not be turned into a request.
    #[error("could not build request: {0}")]
    Build(String),
    /// `finish` was called without a submit in flight.
    #[error("no submit in flight")]
    NotSubmitting,
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// Stopped before the network.
    Rejected(Rejection),
    /// The server accepted the request.
    Succeeded(T),
    /// The request failed; the form is back to `Idle` with its data intact.
    Failed(ApiError),
}

impl<T> SubmitOutcome<T> {
    /// Returns `true` if the request succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Returns the output of a successful submit.
    pub fn output(&self) -> Option<&T> {
        match self {
            Self::Succeeded(output) => Some(output),
            _ => None,
        }
    }

    /// Returns the rejection, if the submit never reached the network.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Returns the API error of a failed request.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Owns one form's values, field errors, submission state and toasts.
///
/// Drive it either with [`submit`](Self::submit), or with
/// [`begin_submit`](Self::begin_submit) / [`finish`](Self::finish) when the
/// request runs elsewhere (e.g. a spawned task in a UI event loop).
pub struct FormController<F: Form> {
    form: F,
    values: FormState,
    errors: FieldErrors,
    state: SubmissionState,
    reset_delay: Option<Duration>,
    revert_at: Option<Instant>,
    toasts: ToastQueue,
}

impl<F: Form> FormController<F> {
    /// Creates a controller with the form's initial values.
    pub fn new(form: F) -> Self {
        Self {
            values: form.initial_state(),
            reset_delay: form.success_display(),
            errors: FieldErrors::new(),
            state: SubmissionState::Idle,
            revert_at: None,
            toasts: ToastQueue::default(),
            form,
        }
    }

    /// Overrides how long the success banner shows before reset.
    pub fn with_reset_delay(mut self, delay: Option<Duration>) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Starts from the given values instead of the form's initial state.
    pub fn with_values(mut self, values: FormState) -> Self {
        self.values = values;
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn values(&self) -> &FormState {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Returns the error shown under a field.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Returns `true` if the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    /// Returns `true` if inputs accept edits.
    pub fn inputs_enabled(&self) -> bool {
        !(self.state == SubmissionState::Submitting && self.form.locks_inputs())
    }

    /// Returns when the success banner will revert, if it is showing.
    pub fn revert_deadline(&self) -> Option<Instant> {
        self.revert_at
    }

    /// Returns the toasts waiting to be shown.
    pub fn pending_toasts(&self) -> &[Toast] {
        self.toasts.pending()
    }

    /// Removes and returns the toasts waiting to be shown.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Applies a user edit.
    ///
    /// Clears the field's error. An edit while `Succeeded` dismisses the
    /// banner and drops the pending reset. Returns `false` if the edit was
    /// ignored because inputs are locked.
    pub fn set_field(&mut self, field: &str, value: impl Into<FieldValue>) -> bool {
        if !self.inputs_enabled() {
            log::debug!("{}: ignoring edit to '{}' while submitting", self.form.name(), field);
            return false;
        }
        self.values.set(field, value);
        self.errors.remove(field);
        if self.state == SubmissionState::Succeeded {
            self.transition(SubmissionState::Idle);
            self.revert_at = None;
        }
        true
    }

    /// Validates and, if the form is acceptable, moves to `Submitting` and
    /// returns the request to send.
    pub fn begin_submit(&mut self) -> Result<F::Request, Rejection> {
        if !self.state.can_submit() {
            log::debug!("{}: submit ignored in {:?}", self.form.name(), self.state);
            return Err(Rejection::Busy(self.state));
        }

        let result = validate(&self.values, self.form.rules());
        if !result.is_valid() {
            self.errors = result.into_errors();
            self.toasts.push(Toast::error(INVALID_FORM_MESSAGE));
            return Err(Rejection::Invalid(self.errors.clone()));
        }
        self.errors.clear();

        if let Some(message) = self.form.domain_check(&self.values) {
            self.toasts.push(Toast::error(message.clone()));
            return Err(Rejection::Domain(message));
        }

        let request = self.form.build_request(&self.values).map_err(|message| {
            log::warn!("{}: {}", self.form.name(), message);
            self.toasts.push(Toast::error(message.clone()));
            Rejection::Build(message)
        })?;

        self.transition(SubmissionState::Submitting);
        Ok(request)
    }

    /// Settles the in-flight submit with the request's result.
    pub fn finish(&mut self, result: Result<F::Output, ApiError>) -> SubmitOutcome<F::Output> {
        if self.state != SubmissionState::Submitting {
            log::warn!("{}: finish called in {:?}", self.form.name(), self.state);
            return SubmitOutcome::Rejected(Rejection::NotSubmitting);
        }

        match result {
            Ok(output) => {
                self.errors.clear();
                self.toasts.push(Toast::success(self.form.success_message(&output)));
                match self.reset_delay {
                    Some(delay) => {
                        self.transition(SubmissionState::Succeeded);
                        self.revert_at = Some(Instant::now() + delay);
                    }
                    None => self.transition(SubmissionState::Idle),
                }
                SubmitOutcome::Succeeded(output)
            }
            Err(err) => {
                log::warn!("{}: submit failed: {}", self.form.name(), err);
                self.transition(SubmissionState::Idle);
                self.errors.merge_server(err.field_errors());
                self.toasts.push(Toast::error(err.user_message()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Validates, sends exactly one request and settles it.
    pub async fn submit(&mut self, client: &FleetClient) -> SubmitOutcome<F::Output> {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };
        let result = self.form.send(client, request).await;
        self.finish(result)
    }

    /// Reverts `Succeeded` to a fresh `Idle` form once the deadline passed.
    ///
    /// Returns `true` if the form was reset.
    pub fn poll_revert(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(at) if now >= at && self.state == SubmissionState::Succeeded => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Waits for the success banner's deadline, then reverts.
    ///
    /// Returns immediately with `false` if no reset is pending.
    pub async fn settle(&mut self) -> bool {
        let Some(at) = self.revert_at else {
            return false;
        };
        tokio::time::sleep_until(at).await;
        self.poll_revert(Instant::now())
    }

    /// Clears values and errors and returns to `Idle`.
    pub fn reset(&mut self) {
        self.values = self.form.initial_state();
        self.errors.clear();
        self.revert_at = None;
        self.transition(SubmissionState::Idle);
    }

    fn transition(&mut self, next: SubmissionState) {
        if self.state != next {
            log::debug!("{}: {:?} -> {:?}", self.form.name(), self.state, next);
            self.state = next;
        }
    }
}
