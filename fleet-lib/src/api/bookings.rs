//! Booking endpoints

use serde_json::json;

use super::{DEFAULT_PAGE_SIZE, Page};
use crate::FleetClient;
use crate::error::ApiError;
use crate::model::{Booking, BookingPatch, BookingStatus, NewBooking};
use crate::transport::ApiRequest;

/// Filters and paging for the booking list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingQuery {
    pub page: usize,
    pub per_page: usize,
    pub status: Option<BookingStatus>,
    pub customer_id: Option<String>,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            status: None,
            customer_id: None,
        }
    }
}

impl BookingQuery {
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
    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to one customer.
    pub fn customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    fn to_request(&self) -> ApiRequest {
        ApiRequest::get("bookings")
            .with_query("page", self.page)
            .with_query("limit", self.per_page)
            .with_optional_query("status", self.status)
            .with_optional_query("customerId", self.customer_id.as_deref())
    }
}

impl FleetClient {
    /// Books a vehicle for a ride.
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        let body = serde_json::to_value(booking)?;
        self.call(ApiRequest::post("bookings", body)).await
    }

    /// Lists bookings, one page at a time.
    pub async fn list_bookings(&self, query: &BookingQuery) -> Result<Page<Booking>, ApiError> {
        self.call(query.to_request()).await
    }

    /// Changes a booking's status and returns the fields the server confirmed.
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<BookingPatch, ApiError> {
        let request = ApiRequest::patch(format!("bookings/{}/status", id), json!({ "status": status }));
        self.call(request).await
    }

    /// Cancels a booking.
    ///
    /// A success response without a body still confirms the cancellation.
    pub async fn cancel_booking(&self, id: &str) -> Result<BookingPatch, ApiError> {
        let response = self.send(ApiRequest::delete(format!("bookings/{}", id))).await?;
        if response.data.is_null() {
            return Ok(BookingPatch {
                status: Some(BookingStatus::Cancelled),
                ..BookingPatch::default()
            });
        }
        serde_json::from_value(response.data.clone())
            .map_err(|e| ApiError::parse_with_body(e.to_string(), response.data.to_string()))
    }
}
