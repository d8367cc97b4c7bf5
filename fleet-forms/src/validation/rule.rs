//! Declarative per-field rules.

use std::sync::Arc;

use regex::Regex;

use super::{FieldValue, FormState};

/// Cross-field check: receives the raw value and the whole record and returns
/// an error message, or `None` when the value is acceptable.
pub type CustomCheck = Arc<dyn Fn(&FieldValue, &FormState) -> Option<String> + Send + Sync>;

/// How a field's value is interpreted by the numeric check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueType {
    #[default]
    Text,
    Number,
}

/// Constraints for one form field.
///
/// # Example
///
/// ```
/// use fleet_forms::validation::FieldRule;
/// use regex::Regex;
///
/// let pincode = FieldRule::new()
///     .required()
///     .pattern(Regex::new(r"^\d{6}$").unwrap())
///     .message("Pincode must be 6 digits");
/// ```
#[derive(Clone, Default)]
pub struct FieldRule {
    /// Name used in generated messages instead of the field name.
    pub label: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    /// Replaces the generated message when the pattern does not match.
    pub message: Option<String>,
    pub value_type: ValueType,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub check: Option<CustomCheck>,
}

impl FieldRule {
    /// Creates a rule with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display label used in messages.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Requires a non-blank value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Requires at least `n` characters.
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Allows at most `n` characters.
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Requires the stringified value to match `pattern`.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets the message reported when the pattern does not match.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Interprets the value as a number.
    pub fn number(mut self) -> Self {
        self.value_type = ValueType::Number;
        self
    }

    /// Sets the numeric lower bound (inclusive).
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the numeric upper bound (inclusive).
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Adds a custom check, run after every structural check has passed.
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&FieldValue, &FormState) -> Option<String> + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(check));
        self
    }

    /// Returns the name to use in messages for `field`.
    pub fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(field)
    }
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("message", &self.message)
            .field("value_type", &self.value_type)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("check", &self.check.is_some())
            .finish()
    }
}
