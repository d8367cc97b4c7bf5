//! Rules and parsing shared across forms.

use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use regex::Regex;

use super::field;
use crate::validation::{FieldRule, FieldValue, FormState};

/// Six-digit Indian postal code.
pub const PINCODE_PATTERN: &str = r"^[0-9]{6}$";

/// Domain rejection for a ride that starts and ends at the same pincode.
pub const SAME_PINCODE_MESSAGE: &str = "Destination pincode must differ from pickup pincode";

static PINCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PINCODE_PATTERN).expect("Invalid pincode pattern"));

/// Largest load the fleet accepts, in kilograms.
pub(crate) const MAX_CAPACITY_KG: f64 = 50000.0;

pub(crate) fn pincode_rule(label: &str) -> FieldRule {
    FieldRule::new()
        .label(label)
        .required()
        .pattern(PINCODE.clone())
        .message(format!("{} must be a 6-digit pincode", label))
}

pub(crate) fn start_time_rule() -> FieldRule {
    FieldRule::new()
        .label("Start time")
        .required()
        .check(|value, _| match value.to_text() {
            Some(text) if parse_start_time(&text).is_some() => None,
            _ => Some("Start time must be a valid date and time".to_string()),
        })
}

/// Custom check rejecting fractional numbers.
pub(crate) fn whole_number(label: &'static str) -> impl Fn(&FieldValue, &FormState) -> Option<String> {
    move |value, _| match value.as_number() {
        Some(n) if n.fract() != 0.0 => Some(format!("{} must be a whole number", label)),
        _ => None,
    }
}

/// Rejects rides that start and end at the same pincode.
pub(crate) fn same_pincode(state: &FormState) -> Option<String> {
    let from = state.text(field::FROM_PINCODE)?;
    let to = state.text(field::TO_PINCODE)?;
    (from == to).then(|| SAME_PINCODE_MESSAGE.to_string())
}

/// Parses a start time as RFC 3339, or as a local `YYYY-MM-DDTHH:MM[:SS]`
/// as produced by a datetime input.
pub fn parse_start_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Reads a validated number field as `u32`.
pub(crate) fn whole(state: &FormState, name: &str) -> Result<u32, String> {
    state
        .number(name)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
        .ok_or_else(|| format!("{} is not a whole number", name))
}

/// Reads a validated text field.
pub(crate) fn text(state: &FormState, name: &str) -> Result<String, String> {
    state.text(name).ok_or_else(|| format!("{} is missing", name))
}

/// Reads a validated start time field.
pub(crate) fn start_time(state: &FormState) -> Result<DateTime<Utc>, String> {
    state
        .text(field::START_TIME)
        .as_deref()
        .and_then(parse_start_time)
        .ok_or_else(|| "Start time is not a valid date and time".to_string())
}
