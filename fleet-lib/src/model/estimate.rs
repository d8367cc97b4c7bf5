//! Display-only estimates for a ride
//!
//! These mirror the server's arithmetic so forms can preview a booking. The
//! server's numbers are authoritative; the cost figure is indicative only.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Flat fare added to every indicative cost.
pub const BASE_FARE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Indicative charge per ride hour.
pub const RATE_PER_HOUR: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Indicative charge per tonne of capacity per ride hour.
pub const RATE_PER_TONNE_HOUR: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Estimated ride duration in hours between two pincodes.
///
/// Returns `None` if either pincode is not numeric.
pub fn ride_duration_hours(from_pincode: &str, to_pincode: &str) -> Option<u32> {
    let from: i64 = from_pincode.trim().parse().ok()?;
    let to: i64 = to_pincode.trim().parse().ok()?;
    u32::try_from(to.abs_diff(from) % 24).ok()
}

/// Estimated end time of a ride starting at `start`.
pub fn estimated_end_time(start: DateTime<Utc>, duration_hours: u32) -> DateTime<Utc> {
    start + Duration::hours(i64::from(duration_hours))
}

/// Indicative cost of a ride, for display next to a search result.
pub fn indicative_cost(duration_hours: u32, capacity_kg: u32) -> Decimal {
    let hours = Decimal::from(duration_hours);
    let tonnes = Decimal::from(capacity_kg) / Decimal::from(1000);
    (BASE_FARE + RATE_PER_HOUR * hours + RATE_PER_TONNE_HOUR * tonnes * hours).round_dp(2)
}
