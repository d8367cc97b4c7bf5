//! API operations
//!
//! Endpoint methods live on [`FleetClient`](crate::FleetClient), grouped by
//! resource.

mod bookings;
mod page;
mod vehicles;

pub use bookings::BookingQuery;
pub use page::Page;
pub use vehicles::VehicleQuery;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: usize = 10;
