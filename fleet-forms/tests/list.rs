//! Row status updates against a scripted transport.

mod common;

use common::{ScriptedTransport, booking_json, vehicle_json};
use fleet_forms::list::{ListError, RecordList};
use fleet_lib::model::{Booking, BookingStatus, Vehicle, VehicleStatus};
use fleet_lib::transport::Method;
use serde_json::json;

fn bookings() -> RecordList<Booking> {
    let items = vec![
        serde_json::from_value(booking_json("b1", "pending")).unwrap(),
        serde_json::from_value(booking_json("b2", "completed")).unwrap(),
    ];
    RecordList::new(items)
}

#[tokio::test]
async fn test_booking_status_update_applies_confirmed_patch() {
    let transport = ScriptedTransport::default();
    transport.reply_ok(json!({"status": "confirmed", "updatedAt": "2099-01-01T00:00:00Z"}));
    let client = transport.client();
    let mut list = bookings();

    list.update_status(&client, "b1", BookingStatus::Confirmed)
        .await
        .unwrap();

    let booking = list.get("b1").unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert!(booking.updated_at.is_some());
    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.path, "bookings/b1/status");
}

#[tokio::test]
async fn test_cancel_uses_delete() {
    let transport = ScriptedTransport::default();
    transport.reply_ok(serde_json::Value::Null);
    let client = transport.client();
    let mut list = bookings();

    list.update_status(&client, "b1", BookingStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(list.get("b1").unwrap().status, BookingStatus::Cancelled);
    assert_eq!(transport.requests()[0].method, Method::Delete);
}

#[tokio::test]
async fn test_forbidden_transition_sends_nothing() {
    let transport = ScriptedTransport::default();
    let client = transport.client();
    let mut list = bookings();

    let err = list
        .update_status(&client, "b2", BookingStatus::Pending)
        .await
        .unwrap_err();

    assert!(matches!(err, ListError::NotAllowed { .. }));
    assert!(transport.requests().is_empty());
    assert!(list.pending_toasts()[0].is_error());
}

#[tokio::test]
async fn test_vehicle_update_failure_leaves_row() {
    let transport = ScriptedTransport::default();
    let client = transport.client();
    let vehicle: Vehicle = serde_json::from_value(vehicle_json("v1", "Tata Ace")).unwrap();
    let mut list = RecordList::new(vec![vehicle]);

    let err = list
        .update_status(&client, "v1", VehicleStatus::Maintenance)
        .await
        .unwrap_err();

    assert!(matches!(err, ListError::Api(_)));
    assert_eq!(list.get("v1").unwrap().status, VehicleStatus::Active);
    assert!(!list.is_updating("v1"));
    assert_eq!(transport.requests().len(), 1);
}
