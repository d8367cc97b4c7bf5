//! Form validation and submission flows for the fleet booking client.
//!
//! - [`validation`]: a pure rule interpreter mapping field values to field errors
//! - [`submission`]: the per-form idle/submitting/succeeded controller
//! - [`forms`]: the add-vehicle, availability search and booking forms
//! - [`list`]: row-level status updates over a locally held list
//! - [`query`]: latest-wins query tokens for search-as-you-type
//! - [`fallback`]: panic containment for the outer shell

pub mod fallback;
pub mod forms;
pub mod list;
pub mod query;
pub mod submission;
pub mod toast;
pub mod validation;

pub mod prelude {
    pub use crate::forms::{AddVehicleForm, BookVehicleForm, SearchAvailabilityForm};
    pub use crate::submission::{Form, FormController, Rejection, SubmissionState, SubmitOutcome};
    pub use crate::toast::{Toast, ToastLevel};
    pub use crate::validation::{
        FieldErrors, FieldRule, FieldValue, FormState, RuleSet, ValidationResult, validate,
    };
}
