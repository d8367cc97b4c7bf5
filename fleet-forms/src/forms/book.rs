//! Booking form.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::Utc;
use fleet_lib::FleetClient;
use fleet_lib::error::ApiError;
use fleet_lib::model::{Booking, NewBooking};
use regex::Regex;

use super::field;
use super::fields::{parse_start_time, pincode_rule, same_pincode, start_time, text};
use crate::submission::Form;
use crate::validation::{FieldRule, FormState, RuleSet};

static CUSTOMER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid customer id pattern"));

/// Books a vehicle found by a search. Resets after the success banner.
#[derive(Debug, Clone)]
pub struct BookVehicleForm {
    rules: RuleSet,
}

impl BookVehicleForm {
    pub fn new() -> Self {
        let rules = RuleSet::new()
            .field(
                field::VEHICLE_ID,
                FieldRule::new().label("Vehicle").required(),
            )
            .field(
                field::CUSTOMER_ID,
                FieldRule::new()
                    .label("Customer ID")
                    .required()
                    .min_length(3)
                    .max_length(50)
                    .pattern(CUSTOMER_ID.clone())
                    .message("Customer ID may only contain letters, numbers, hyphens and underscores"),
            )
            .field(field::FROM_PINCODE, pincode_rule("From pincode"))
            .field(field::TO_PINCODE, pincode_rule("To pincode"))
            .field(
                field::START_TIME,
                FieldRule::new()
                    .label("Start time")
                    .required()
                    .check(|value, _| {
                        let parsed = value.to_text().as_deref().and_then(parse_start_time);
                        match parsed {
                            None => Some("Start time must be a valid date and time".to_string()),
                            Some(at) if at < Utc::now() => {
                                Some("Start time cannot be in the past".to_string())
                            }
                            Some(_) => None,
                        }
                    }),
            );
        Self { rules }
    }

    /// Prefills a booking from a search result: the chosen vehicle plus the
    /// search's route and start time.
    pub fn prefill(vehicle_id: &str, search: &FormState) -> FormState {
        let mut state = FormState::new().with(field::VEHICLE_ID, vehicle_id);
        for name in [field::FROM_PINCODE, field::TO_PINCODE, field::START_TIME] {
            state.set(name, search.get(name).clone());
        }
        state
    }
}

impl Default for BookVehicleForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Form for BookVehicleForm {
    type Request = NewBooking;
    type Output = Booking;

    fn name(&self) -> &'static str {
        "book-vehicle"
    }

    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn domain_check(&self, state: &FormState) -> Option<String> {
        same_pincode(state)
    }

    fn build_request(&self, state: &FormState) -> Result<NewBooking, String> {
        Ok(NewBooking {
            vehicle_id: text(state, field::VEHICLE_ID)?,
            customer_id: text(state, field::CUSTOMER_ID)?,
            from_pincode: text(state, field::FROM_PINCODE)?,
            to_pincode: text(state, field::TO_PINCODE)?,
            start_time: start_time(state)?,
        })
    }

    async fn send(&self, client: &FleetClient, request: NewBooking) -> Result<Booking, ApiError> {
        client.create_booking(&request).await
    }

    fn success_message(&self, booking: &Booking) -> String {
        format!("Booking confirmed for {}", booking.customer_id)
    }

    fn locks_inputs(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    fn valid_state() -> FormState {
        FormState::new()
            .with(field::VEHICLE_ID, "v1")
            .with(field::CUSTOMER_ID, "cust_42")
            .with(field::FROM_PINCODE, "110001")
            .with(field::TO_PINCODE, "110005")
            .with(field::START_TIME, "2099-01-02T09:30:00Z")
    }

    #[test]
    fn test_valid_booking() {
        let form = BookVehicleForm::new();
        let state = valid_state();
        assert!(validate(&state, form.rules()).is_valid());
        let request = form.build_request(&state).unwrap();
        assert_eq!(request.customer_id, "cust_42");
        assert_eq!(request.start_time.to_rfc3339(), "2099-01-02T09:30:00+00:00");
    }

    #[test]
    fn test_customer_id_rules() {
        let form = BookVehicleForm::new();
        let cases = [
            ("ab", Some("Customer ID must be at least 3 characters")),
            (
                "cust 42",
                Some("Customer ID may only contain letters, numbers, hyphens and underscores"),
            ),
            ("cust-42_x", None),
        ];
        for (value, expected) in cases {
            let state = valid_state().with(field::CUSTOMER_ID, value);
            let result = validate(&state, form.rules());
            assert_eq!(result.errors().get(field::CUSTOMER_ID), expected, "value {:?}", value);
        }
    }

    #[test]
    fn test_start_time_in_past() {
        let form = BookVehicleForm::new();
        let state = valid_state().with(field::START_TIME, "2001-01-01T00:00:00Z");
        let result = validate(&state, form.rules());
        assert_eq!(
            result.errors().get(field::START_TIME),
            Some("Start time cannot be in the past")
        );
    }

    #[test]
    fn test_missing_vehicle() {
        let form = BookVehicleForm::new();
        let mut state = valid_state();
        state.remove(field::VEHICLE_ID);
        let result = validate(&state, form.rules());
        assert_eq!(result.errors().get(field::VEHICLE_ID), Some("Vehicle is required"));
    }

    #[test]
    fn test_prefill_from_search() {
        let search = FormState::new()
            .with(field::CAPACITY_REQUIRED, "500")
            .with(field::FROM_PINCODE, "110001")
            .with(field::TO_PINCODE, "110005")
            .with(field::START_TIME, "2099-01-02T09:30");
        let state = BookVehicleForm::prefill("v9", &search);
        assert_eq!(state.text(field::VEHICLE_ID).as_deref(), Some("v9"));
        assert_eq!(state.text(field::TO_PINCODE).as_deref(), Some("110005"));
        assert!(state.text(field::CAPACITY_REQUIRED).is_none());
        assert!(state.text(field::CUSTOMER_ID).is_none());
    }
}
