//! Validation results and the per-field error map.

use fleet_lib::error::ServerFieldError;

/// A single field error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name, as declared in the rule set.
    pub field: String,
    /// Error message.
    pub message: String,
}

/// Errors keyed by field name, at most one per field.
///
/// Keeps the order in which fields first failed, which for client
/// validation is the rule set's declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error for a field, replacing any existing one in place.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = message,
            None => self.errors.push(FieldError { field, message }),
        }
    }

    /// Returns the error message for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Returns `true` if the field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Clears a field's error and returns it.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        let index = self.errors.iter().position(|e| e.field == field)?;
        Some(self.errors.remove(index).message)
    }

    /// Merges server-reported field errors; later entries win.
    pub fn merge_server(&mut self, errors: &[ServerFieldError]) {
        for error in errors {
            self.insert(error.path.clone(), error.message.clone());
        }
    }

    /// Removes every error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterates over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns the names of the fields with errors.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no field has an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of validating a form state against a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: FieldErrors,
}

impl ValidationResult {
    /// Wraps an error map.
    pub fn from_errors(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Returns `true` if every field passed. Always equal to `errors().is_empty()`.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the per-field errors.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consumes the result and returns the per-field errors.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}
