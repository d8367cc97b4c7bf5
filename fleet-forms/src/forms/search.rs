//! Availability search form.

use async_trait::async_trait;
use fleet_lib::FleetClient;
use fleet_lib::error::ApiError;
use fleet_lib::model::{AvailabilityQuery, AvailableVehicle};

use super::field;
use super::fields::{
    MAX_CAPACITY_KG, pincode_rule, same_pincode, start_time, start_time_rule, text, whole,
    whole_number,
};
use crate::submission::Form;
use crate::validation::{FieldRule, FormState, RuleSet};

/// Searches for vehicles free for a ride. Keeps its values after a search.
#[derive(Debug, Clone)]
pub struct SearchAvailabilityForm {
    rules: RuleSet,
}

impl SearchAvailabilityForm {
    pub fn new() -> Self {
        let rules = RuleSet::new()
            .field(
                field::CAPACITY_REQUIRED,
                FieldRule::new()
                    .label("Capacity required")
                    .required()
                    .number()
                    .min(1.0)
                    .max(MAX_CAPACITY_KG)
                    .check(whole_number("Capacity required")),
            )
            .field(field::FROM_PINCODE, pincode_rule("From pincode"))
            .field(field::TO_PINCODE, pincode_rule("To pincode"))
            .field(field::START_TIME, start_time_rule());
        Self { rules }
    }
}

impl Default for SearchAvailabilityForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Form for SearchAvailabilityForm {
    type Request = AvailabilityQuery;
    type Output = Vec<AvailableVehicle>;

    fn name(&self) -> &'static str {
        "search-availability"
    }

    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn domain_check(&self, state: &FormState) -> Option<String> {
        same_pincode(state)
    }

    fn build_request(&self, state: &FormState) -> Result<AvailabilityQuery, String> {
        Ok(AvailabilityQuery {
            capacity_required: whole(state, field::CAPACITY_REQUIRED)?,
            from_pincode: text(state, field::FROM_PINCODE)?,
            to_pincode: text(state, field::TO_PINCODE)?,
            start_time: start_time(state)?,
        })
    }

    async fn send(
        &self,
        client: &FleetClient,
        request: AvailabilityQuery,
    ) -> Result<Vec<AvailableVehicle>, ApiError> {
        client.available_vehicles(&request).await
    }

    fn success_message(&self, vehicles: &Vec<AvailableVehicle>) -> String {
        match vehicles.len() {
            0 => "No vehicles available for the selected criteria".to_string(),
            1 => "Found 1 available vehicle".to_string(),
            n => format!("Found {} available vehicles", n),
        }
    }

    fn success_display(&self) -> Option<std::time::Duration> {
        None
    }
}
