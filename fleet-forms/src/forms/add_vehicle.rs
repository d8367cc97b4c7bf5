//! Add-vehicle form.

use async_trait::async_trait;
use fleet_lib::FleetClient;
use fleet_lib::error::ApiError;
use fleet_lib::model::{NewVehicle, Vehicle};

use super::field;
use super::fields::{MAX_CAPACITY_KG, text, whole, whole_number};
use crate::submission::Form;
use crate::validation::{FieldRule, FormState, RuleSet};

/// Adds a vehicle to the fleet. Resets after the success banner.
#[derive(Debug, Clone)]
pub struct AddVehicleForm {
    rules: RuleSet,
}

impl AddVehicleForm {
    pub fn new() -> Self {
        let rules = RuleSet::new()
            .field(
                field::NAME,
                FieldRule::new()
                    .label("Vehicle name")
                    .required()
                    .min_length(2)
                    .max_length(100),
            )
            .field(
                field::CAPACITY_KG,
                FieldRule::new()
                    .label("Capacity (kg)")
                    .required()
                    .number()
                    .min(1.0)
                    .max(MAX_CAPACITY_KG)
                    .check(whole_number("Capacity (kg)")),
            )
            .field(
                field::TYRES,
                FieldRule::new()
                    .label("Number of tyres")
                    .required()
                    .number()
                    .min(2.0)
                    .max(20.0)
                    .check(whole_number("Number of tyres")),
            );
        Self { rules }
    }
}

impl Default for AddVehicleForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Form for AddVehicleForm {
    type Request = NewVehicle;
    type Output = Vehicle;

    fn name(&self) -> &'static str {
        "add-vehicle"
    }

    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn build_request(&self, state: &FormState) -> Result<NewVehicle, String> {
        Ok(NewVehicle {
            name: text(state, field::NAME)?,
            capacity_kg: whole(state, field::CAPACITY_KG)?,
            tyres: whole(state, field::TYRES)?,
        })
    }

    async fn send(&self, client: &FleetClient, request: NewVehicle) -> Result<Vehicle, ApiError> {
        client.add_vehicle(&request).await
    }

    fn success_message(&self, vehicle: &Vehicle) -> String {
        format!("Vehicle {} added successfully", vehicle.name)
    }

    fn locks_inputs(&self) -> bool {
        true
    }
}
