//! Vehicle endpoints

use chrono::SecondsFormat;
use serde_json::json;

use super::{DEFAULT_PAGE_SIZE, Page};
use crate::FleetClient;
use crate::error::ApiError;
use crate::model::{AvailabilityQuery, AvailableVehicle, NewVehicle, Vehicle, VehiclePatch, VehicleStatus};
use crate::transport::ApiRequest;

/// Filters and paging for the vehicle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuery {
    pub page: usize,
    pub per_page: usize,
    pub status: Option<VehicleStatus>,
}

impl Default for VehicleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            status: None,
        }
    }
}

impl VehicleQuery {
    /// Sets the 1-based page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size.
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Restricts results to one status.
    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn to_request(&self) -> ApiRequest {
        ApiRequest::get("vehicles")
            .with_query("page", self.page)
            .with_query("limit", self.per_page)
            .with_optional_query("status", self.status)
    }
}

impl FleetClient {
    /// Adds a vehicle to the fleet.
    pub async fn add_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, ApiError> {
        let body = serde_json::to_value(vehicle)?;
        self.call(ApiRequest::post("vehicles", body)).await
    }

    /// Lists vehicles, one page at a time.
    pub async fn list_vehicles(&self, query: &VehicleQuery) -> Result<Page<Vehicle>, ApiError> {
        self.call(query.to_request()).await
    }

    /// Finds vehicles with enough capacity that are free for the requested ride.
    pub async fn available_vehicles(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<AvailableVehicle>, ApiError> {
        let request = ApiRequest::get("vehicles/available")
            .with_query("capacityRequired", query.capacity_required)
            .with_query("fromPincode", &query.from_pincode)
            .with_query("toPincode", &query.to_pincode)
            .with_query(
                "startTime",
                query.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        self.call(request).await
    }

    /// Changes a vehicle's status and returns the fields the server confirmed.
    pub async fn update_vehicle_status(
        &self,
        id: &str,
        status: VehicleStatus,
    ) -> Result<VehiclePatch, ApiError> {
        let request = ApiRequest::patch(format!("vehicles/{}/status", id), json!({ "status": status }));
        self.call(request).await
    }
}
