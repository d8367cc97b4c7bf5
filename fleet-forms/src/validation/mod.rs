//! Client-side form validation.
//!
//! A form declares a [`RuleSet`] once and validates its [`FormState`] against
//! it before any network effect. The engine is a pure function: it never
//! fails and never touches the form.
//!
//! # Example
//!
//! ```
//! use fleet_forms::validation::{validate, FieldRule, FormState, RuleSet};
//!
//! let rules = RuleSet::new()
//!     .field("name", FieldRule::new().required().min_length(2))
//!     .field("capacityKg", FieldRule::new().required().number().min(1.0).max(50000.0));
//!
//! let state = FormState::new()
//!     .with("name", "")
//!     .with("capacityKg", "60000");
//!
//! let result = validate(&state, &rules);
//! assert!(!result.is_valid());
//! assert_eq!(result.errors().get("name"), Some("name is required"));
//! assert_eq!(result.errors().get("capacityKg"), Some("capacityKg cannot exceed 50000"));
//! ```

mod engine;
mod result;
mod rule;
mod rule_set;
mod value;

pub use engine::{validate, validate_field};
pub use result::{FieldError, FieldErrors, ValidationResult};
pub use rule::{CustomCheck, FieldRule, ValueType};
pub use rule_set::RuleSet;
pub use value::{FieldValue, FormState};
