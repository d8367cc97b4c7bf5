//! Field values and form state.

use std::collections::BTreeMap;

/// The current value of one form field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value has been entered.
    #[default]
    Absent,
    /// Raw text as typed.
    Text(String),
    /// A numeric value set programmatically.
    Number(f64),
}

static ABSENT: FieldValue = FieldValue::Absent;

impl FieldValue {
    /// Returns `true` if the value is absent or text that trims to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Returns the value as a string, as it would be displayed in an input.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(n) => Some(n.to_string()),
        }
    }

    /// Returns the raw text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Converts the value to a finite number.
    ///
    /// Text is trimmed before parsing. NaN and infinities are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Absent => return None,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            Self::Number(n) => *n,
        };
        n.is_finite().then_some(n)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// The values of one form, keyed by field name.
///
/// Owned by a single form; never shared across forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    /// Creates an empty form state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field and returns the state, for building fixtures and defaults.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field's value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Returns a field's value; unknown fields are [`FieldValue::Absent`].
    pub fn get(&self, field: &str) -> &FieldValue {
        self.values.get(field).unwrap_or(&ABSENT)
    }

    /// Returns a field's value as trimmed text, if it is not blank.
    pub fn text(&self, field: &str) -> Option<String> {
        let value = self.get(field);
        if value.is_blank() {
            return None;
        }
        value.to_text().map(|text| text.trim().to_string())
    }

    /// Returns a field's value as a number, if it converts.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).as_number()
    }

    /// Removes a field.
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// Iterates over the set fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if no field has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::Absent.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from(" a ").is_blank());
        assert!(!FieldValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_number_conversion() {
        assert_eq!(FieldValue::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(FieldValue::from("1e3").as_number(), Some(1000.0));
        assert_eq!(FieldValue::from("abc").as_number(), None);
        assert_eq!(FieldValue::from("NaN").as_number(), None);
        assert_eq!(FieldValue::Number(f64::NAN).as_number(), None);
        assert_eq!(FieldValue::Number(7.5).as_number(), Some(7.5));
    }

    #[test]
    fn test_number_text_has_no_fraction_when_integral() {
        assert_eq!(FieldValue::Number(60000.0).to_text().as_deref(), Some("60000"));
        assert_eq!(FieldValue::Number(1.5).to_text().as_deref(), Some("1.5"));
    }

    #[test]
    fn test_state_accessors() {
        let state = FormState::new().with("name", "  Truck ").with("tyres", 6u32);
        assert_eq!(state.text("name").as_deref(), Some("Truck"));
        assert_eq!(state.number("tyres"), Some(6.0));
        assert_eq!(state.get("missing"), &FieldValue::Absent);
        assert_eq!(state.text("missing"), None);
    }
}
