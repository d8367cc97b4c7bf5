//! Row-level status updates over a locally held list.
//!
//! Each row carries its own "updating" flag so several rows can have a request
//! in flight at once. On success only the fields the server confirmed are
//! applied to the affected record; on failure the record is left as it was.

use std::collections::HashSet;
use std::fmt;

use fleet_lib::FleetClient;
use fleet_lib::api::{DEFAULT_PAGE_SIZE, Page};
use fleet_lib::error::ApiError;
use fleet_lib::model::{Booking, BookingPatch, BookingStatus, Vehicle, VehiclePatch, VehicleStatus};

use crate::toast::{Toast, ToastQueue};

/// A record that can be shown in a list and have its status changed.
pub trait ListRecord {
    type Status: Copy + PartialEq + fmt::Display + fmt::Debug;
    /// Server-confirmed fields returned by a status update.
    type Patch;

    fn id(&self) -> &str;

    fn status(&self) -> Self::Status;

    /// Returns `true` if the record may move to `next`.
    fn can_transition_to(&self, next: Self::Status) -> bool;

    fn apply(&mut self, patch: &Self::Patch);

    /// Returns `true` if the record matches a lowercase search needle.
    fn matches(&self, needle: &str) -> bool;
}

impl ListRecord for Booking {
    type Status = BookingStatus;
    type Patch = BookingPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> BookingStatus {
        self.status
    }

    fn can_transition_to(&self, next: BookingStatus) -> bool {
        self.status.can_transition_to(next)
    }

    fn apply(&mut self, patch: &BookingPatch) {
        patch.apply_to(self);
    }

    fn matches(&self, needle: &str) -> bool {
        [
            &self.id,
            &self.customer_id,
            &self.vehicle_id,
            &self.from_pincode,
            &self.to_pincode,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl ListRecord for Vehicle {
    type Status = VehicleStatus;
    type Patch = VehiclePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> VehicleStatus {
        self.status
    }

    fn can_transition_to(&self, next: VehicleStatus) -> bool {
        self.status.can_transition_to(next)
    }

    fn apply(&mut self, patch: &VehiclePatch) {
        patch.apply_to(self);
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.id.to_lowercase().contains(needle)
    }
}

/// Why a row update was refused or failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ListError {
    #[error("no record with id '{0}'")]
    UnknownRecord(String),
    #[error("record '{0}' is already being updated")]
    AlreadyUpdating(String),
    #[error("Cannot change status from {from} to {to}")]
    NotAllowed { from: String, to: String },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Status filter, free-text search and page for a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilter<S> {
    pub status: Option<S>,
    pub search: Option<String>,
    pub page: usize,
    pub per_page: usize,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<S> ListFilter<S> {
    pub fn status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }
}

/// A locally held list of records with per-row update tracking.
#[derive(Debug, Clone)]
pub struct RecordList<T: ListRecord> {
    items: Vec<T>,
    updating: HashSet<String>,
    toasts: ToastQueue,
}

impl<T: ListRecord> Default for RecordList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: ListRecord> RecordList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            updating: HashSet::new(),
            toasts: ToastQueue::default(),
        }
    }

    /// Replaces the records after a reload. Update flags survive for rows
    /// that are still present.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        let items = &self.items;
        self.updating
            .retain(|id| items.iter().any(|record| record.id() == id));
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` while a row's status update is in flight.
    pub fn is_updating(&self, id: &str) -> bool {
        self.updating.contains(id)
    }

    pub fn pending_toasts(&self) -> &[Toast] {
        self.toasts.pending()
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Marks a row as updating before its request is sent.
    ///
    /// Refuses unknown rows, rows already updating and transitions the
    /// record's status does not allow.
    pub fn begin_update(&mut self, id: &str, next: T::Status) -> Result<(), ListError> {
        let Some(record) = self.get(id) else {
            return Err(ListError::UnknownRecord(id.to_string()));
        };
        if self.updating.contains(id) {
            log::debug!("update of '{}' ignored, already in flight", id);
            return Err(ListError::AlreadyUpdating(id.to_string()));
        }
        if !record.can_transition_to(next) {
            let err = ListError::NotAllowed {
                from: record.status().to_string(),
                to: next.to_string(),
            };
            self.toasts.push(Toast::error(err.to_string()));
            return Err(err);
        }
        self.updating.insert(id.to_string());
        Ok(())
    }

    /// Settles a row's update.
    ///
    /// On success the confirmed fields are applied to that row only. On failure
    /// the row is untouched and an error notification is raised.
    pub fn finish_update(
        &mut self,
        id: &str,
        result: Result<T::Patch, ApiError>,
    ) -> Result<(), ListError> {
        self.updating.remove(id);
        match result {
            Ok(patch) => {
                match self.items.iter_mut().find(|record| record.id() == id) {
                    Some(record) => {
                        record.apply(&patch);
                        self.toasts
                            .push(Toast::success(format!("Status updated to {}", record.status())));
                    }
                    None => log::debug!("record '{}' left the list before its update finished", id),
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("status update of '{}' failed: {}", id, err);
                self.toasts.push(Toast::error(err.user_message()));
                Err(err.into())
            }
        }
    }

    /// Filters by status and search text, then cuts out the requested page.
    pub fn view(&self, filter: &ListFilter<T::Status>) -> Page<&T> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let matching = self.items.iter().filter(|record| {
            filter.status.is_none_or(|status| record.status() == status)
                && needle.as_deref().is_none_or(|needle| record.matches(needle))
        });
        Page::from_items(matching, filter.page, filter.per_page)
    }
}

impl RecordList<Booking> {
    /// Changes a booking's status through the API. Cancelling uses the
    /// cancel endpoint.
    pub async fn update_status(
        &mut self,
        client: &FleetClient,
        id: &str,
        next: BookingStatus,
    ) -> Result<(), ListError> {
        self.begin_update(id, next)?;
        let result = if next == BookingStatus::Cancelled {
            client.cancel_booking(id).await
        } else {
            client.update_booking_status(id, next).await
        };
        self.finish_update(id, result)
    }
}

impl RecordList<Vehicle> {
    /// Changes a vehicle's status through the API.
    pub async fn update_status(
        &mut self,
        client: &FleetClient,
        id: &str,
        next: VehicleStatus,
    ) -> Result<(), ListError> {
        self.begin_update(id, next)?;
        let result = client.update_vehicle_status(id, next).await;
        self.finish_update(id, result)
    }
}
