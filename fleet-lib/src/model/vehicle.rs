//! Vehicle records and status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
}

impl VehicleStatus {
    /// All statuses, in display order.
    pub const ALL: [VehicleStatus; 3] = [Self::Active, Self::Maintenance, Self::Inactive];

    /// Returns the wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Inactive => "inactive",
        }
    }

    /// Returns the human-readable badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Maintenance => "In maintenance",
            Self::Inactive => "Inactive",
        }
    }

    /// Returns `true` if a vehicle may move from this status to `next`.
    ///
    /// Any vehicle status may change to any other.
    pub fn can_transition_to(&self, next: VehicleStatus) -> bool {
        *self != next
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown vehicle status '{}'", s))
    }
}

/// A vehicle as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub capacity_kg: u32,
    pub tyres: u32,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of an add-vehicle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub name: String,
    pub capacity_kg: u32,
    pub tyres: u32,
}

/// A vehicle returned by the availability search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    /// Ride duration computed by the server for the searched route.
    pub estimated_ride_duration_hours: u32,
}

/// Server-confirmed fields of a vehicle after a status change.
///
/// Only the fields present in the response are applied to a local record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehiclePatch {
    pub status: Option<VehicleStatus>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VehiclePatch {
    /// Applies the confirmed fields to `vehicle`.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(status) = self.status {
            vehicle.status = status;
        }
        if let Some(updated_at) = self.updated_at {
            vehicle.updated_at = Some(updated_at);
        }
    }
}
