//! Async submission flow shared by every form.
//!
//! ```text
//! Idle ──submit (valid)──▶ Submitting ──ok──▶ Succeeded ──delay──▶ Idle (reset)
//!  ▲                           │
//!  └────────────err────────────┘   (field errors merged, data kept)
//! ```

mod controller;
mod form;
mod state;

pub use controller::{FormController, Rejection, SubmitOutcome, INVALID_FORM_MESSAGE};
pub use form::{DEFAULT_RESET_DELAY, Form};
pub use state::SubmissionState;
