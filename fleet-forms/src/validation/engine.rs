//! The rule interpreter.

use super::{FieldErrors, FieldRule, FieldValue, FormState, RuleSet, ValidationResult, ValueType};

/// Validates `record` against every field declared in `rules`.
///
/// Fields are checked in declaration order and each keeps only its first
/// error. The returned errors only ever name fields declared in `rules`.
pub fn validate(record: &FormState, rules: &RuleSet) -> ValidationResult {
    let mut errors = FieldErrors::new();
    for (field, rule) in rules.iter() {
        if let Some(message) = check_field(field, rule, record.get(field), record) {
            errors.insert(field, message);
        }
    }
    ValidationResult::from_errors(errors)
}

/// Validates a single declared field, e.g. when it loses focus.
///
/// Returns `None` for valid or undeclared fields.
pub fn validate_field(record: &FormState, rules: &RuleSet, field: &str) -> Option<String> {
    let rule = rules.get(field)?;
    check_field(field, rule, record.get(field), record)
}

/// Runs the checks for one field, stopping at the first failure.
///
/// Order: required, skip-if-optional-and-empty, length, pattern, numeric,
/// custom. The custom check only runs once every structural check passed.
fn check_field(
    field: &str,
    rule: &FieldRule,
    value: &FieldValue,
    record: &FormState,
) -> Option<String> {
    let name = rule.display_name(field);

    if value.is_blank() {
        return rule.required.then(|| format!("{} is required", name));
    }

    if let Some(text) = value.as_str() {
        let len = text.chars().count();
        if let Some(min) = rule.min_length {
            if len < min {
                return Some(format!("{} must be at least {} characters", name, min));
            }
        }
        if let Some(max) = rule.max_length {
            if len > max {
                return Some(format!("{} cannot exceed {} characters", name, max));
            }
        }
    }

    if let Some(pattern) = &rule.pattern {
        let text = value.to_text().unwrap_or_default();
        if !pattern.is_match(&text) {
            return Some(
                rule.message
                    .clone()
                    .unwrap_or_else(|| format!("{} format is invalid", name)),
            );
        }
    }

    if rule.value_type == ValueType::Number {
        let Some(n) = value.as_number() else {
            return Some(format!("{} must be a valid number", name));
        };
        if let Some(min) = rule.min {
            if n < min {
                return Some(format!("{} must be at least {}", name, min));
            }
        }
        if let Some(max) = rule.max {
            if n > max {
                return Some(format!("{} cannot exceed {}", name, max));
            }
        }
    }

    let check = rule.check.as_ref()?;
    check(value, record).filter(|message| !message.trim().is_empty())
}
