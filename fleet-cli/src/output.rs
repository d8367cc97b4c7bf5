//! Terminal output for toasts, field errors and records.

use fleet_forms::fallback::FallbackReport;
use fleet_forms::toast::{Toast, ToastLevel};
use fleet_forms::validation::FieldErrors;
use fleet_lib::api::Page;
use fleet_forms::forms::parse_start_time;
use fleet_lib::model::{
    AvailableVehicle, Booking, Vehicle, estimated_end_time, indicative_cost, ride_duration_hours,
};

pub fn format_toast(toast: &Toast) -> String {
    let tag = match toast.level {
        ToastLevel::Success => "ok",
        ToastLevel::Error => "error",
    };
    match &toast.body {
        Some(body) => format!("[{}] {}\n  {}", tag, toast.title, body),
        None => format!("[{}] {}", tag, toast.title),
    }
}

/// Prints toasts, errors to stderr and the rest to stdout.
pub fn toasts(toasts: &[Toast]) {
    for toast in toasts {
        if toast.is_error() {
            eprintln!("{}", format_toast(toast));
        } else {
            println!("{}", format_toast(toast));
        }
    }
}

pub fn format_field_errors(errors: &FieldErrors) -> Vec<String> {
    errors
        .iter()
        .map(|error| format!("  {}: {}", error.field, error.message))
        .collect()
}

pub fn field_errors(errors: &FieldErrors) {
    for line in format_field_errors(errors) {
        eprintln!("{}", line);
    }
}

pub fn format_vehicle(vehicle: &Vehicle) -> String {
    format!(
        "{:<26} {:<24} {:>6} kg {:>3} tyres  {}",
        vehicle.id,
        vehicle.name,
        vehicle.capacity_kg,
        vehicle.tyres,
        vehicle.status.label()
    )
}

pub fn format_available(available: &AvailableVehicle) -> String {
    let vehicle = &available.vehicle;
    let hours = available.estimated_ride_duration_hours;
    format!(
        "{:<26} {:<24} {:>6} kg  {:>2} h  est. {}",
        vehicle.id,
        vehicle.name,
        vehicle.capacity_kg,
        hours,
        indicative_cost(hours, vehicle.capacity_kg).normalize()
    )
}

pub fn format_booking(booking: &Booking) -> String {
    format!(
        "{:<26} {:<16} {} -> {}  {} to {}  {}",
        booking.id,
        booking.customer_id,
        booking.from_pincode,
        booking.to_pincode,
        booking.start_time.format("%Y-%m-%d %H:%M"),
        booking.end_time.format("%Y-%m-%d %H:%M"),
        booking.status.label()
    )
}

/// Preview of a ride before it is booked, or `None` if the route or start
/// time cannot be read.
pub fn format_estimate(from_pincode: &str, to_pincode: &str, start: &str) -> Option<String> {
    let hours = ride_duration_hours(from_pincode, to_pincode)?;
    let end = estimated_end_time(parse_start_time(start)?, hours);
    Some(format!(
        "Estimated ride: {} h, ending around {}",
        hours,
        end.format("%Y-%m-%d %H:%M")
    ))
}

pub fn vehicle(vehicle: &Vehicle) {
    println!("{}", format_vehicle(vehicle));
}

pub fn booking(booking: &Booking) {
    println!("{}", format_booking(booking));
}

/// Prints the rows of a locally filtered view followed by the server paging line.
pub fn rows<T>(rows: &Page<&T>, format: impl Fn(&T) -> String, server_page: (usize, usize, usize)) {
    if rows.is_empty() {
        println!("No records found");
    }
    for &row in rows.items() {
        println!("{}", format(row));
    }
    let (page, total_pages, total) = server_page;
    println!("Page {} of {} ({} total)", page, total_pages, total);
}

pub fn fallback(report: &FallbackReport) {
    eprintln!("{}", report.title);
    eprintln!("{}", report.message);
    if let Some(detail) = &report.detail {
        eprintln!("  {}", detail);
    }
    let actions: Vec<_> = report.actions.iter().map(|a| a.label()).collect();
    eprintln!("Options: {}", actions.join(", "));
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fleet_lib::model::{BookingStatus, VehicleStatus};

    use super::*;

    #[test]
    fn test_format_toast() {
        assert_eq!(format_toast(&Toast::success("Saved")), "[ok] Saved");
        assert_eq!(
            format_toast(&Toast::error("Failed").with_body("try again")),
            "[error] Failed\n  try again"
        );
    }

    #[test]
    fn test_format_field_errors_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Vehicle name is required");
        errors.insert("tyres", "Number of tyres must be at least 2");
        assert_eq!(
            format_field_errors(&errors),
            vec![
                "  name: Vehicle name is required".to_string(),
                "  tyres: Number of tyres must be at least 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_available_includes_estimate() {
        let available = AvailableVehicle {
            vehicle: Vehicle {
                id: "v1".into(),
                name: "Tata Ace".into(),
                capacity_kg: 2500,
                tyres: 4,
                status: VehicleStatus::Active,
                created_at: None,
                updated_at: None,
            },
            estimated_ride_duration_hours: 4,
        };
        let line = format_available(&available);
        assert!(line.contains("Tata Ace"));
        assert!(line.ends_with("est. 1350"));
    }

    #[test]
    fn test_format_estimate() {
        assert_eq!(
            format_estimate("110001", "110005", "2030-01-02T22:00:00Z").as_deref(),
            Some("Estimated ride: 4 h, ending around 2030-01-03 02:00")
        );
        assert_eq!(format_estimate("110001", "110005", "soon"), None);
        assert_eq!(format_estimate("１１０００１", "110005", "2030-01-02T22:00:00Z"), None);
    }

    #[test]
    fn test_format_booking() {
        let booking = Booking {
            id: "b1".into(),
            vehicle_id: "v1".into(),
            customer_id: "cust_42".into(),
            from_pincode: "110001".into(),
            to_pincode: "110005".into(),
            start_time: Utc.with_ymd_and_hms(2030, 1, 2, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2030, 1, 2, 13, 0, 0).unwrap(),
            estimated_ride_duration_hours: 4,
            status: BookingStatus::InProgress,
            updated_at: None,
        };
        let line = format_booking(&booking);
        assert!(line.contains("110001 -> 110005"));
        assert!(line.contains("2030-01-02 09:00 to 2030-01-02 13:00"));
        assert!(line.ends_with("In progress"));
    }
}
