//! End-to-end submission flows over a scripted transport.

mod common;

use std::time::Duration;

use common::{ScriptedTransport, booking_json, vehicle_json};
use fleet_forms::forms::{SAME_PINCODE_MESSAGE, field};
use fleet_forms::prelude::*;
use fleet_forms::submission::INVALID_FORM_MESSAGE;
use fleet_lib::error::{ApiError, ServerFieldError, status_message};
use fleet_lib::transport::Method;
use serde_json::json;
use tokio::time::Instant;

fn add_vehicle_values() -> FormState {
    FormState::new()
        .with(field::NAME, "Tata Ace")
        .with(field::CAPACITY_KG, "750")
        .with(field::TYRES, "4")
}

fn search_values() -> FormState {
    FormState::new()
        .with(field::CAPACITY_REQUIRED, "500")
        .with(field::FROM_PINCODE, "110001")
        .with(field::TO_PINCODE, "110005")
        .with(field::START_TIME, "2099-01-02T09:30:00Z")
}

#[tokio::test]
async fn test_invalid_add_vehicle_makes_no_request() {
    let transport = ScriptedTransport::default();
    let client = transport.client();
    let mut controller = FormController::new(AddVehicleForm::new()).with_values(
        FormState::new()
            .with(field::NAME, "")
            .with(field::CAPACITY_KG, "60000")
            .with(field::TYRES, "1"),
    );

    let outcome = controller.submit(&client).await;

    assert!(matches!(outcome.rejection(), Some(Rejection::Invalid(errors)) if errors.len() == 3));
    assert_eq!(controller.errors().len(), 3);
    assert!(controller.field_error(field::NAME).is_some());
    assert!(controller.field_error(field::CAPACITY_KG).is_some());
    assert!(controller.field_error(field::TYRES).is_some());
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.pending_toasts()[0].title, INVALID_FORM_MESSAGE);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_identical_pincodes_rejected_before_network() {
    let transport = ScriptedTransport::default();
    let client = transport.client();
    let mut controller = FormController::new(SearchAvailabilityForm::new())
        .with_values(search_values().with(field::TO_PINCODE, "110001"));

    let outcome = controller.submit(&client).await;

    assert_eq!(
        outcome.rejection(),
        Some(&Rejection::Domain(SAME_PINCODE_MESSAGE.to_string()))
    );
    assert!(controller.errors().is_empty());
    assert_eq!(controller.pending_toasts()[0].title, SAME_PINCODE_MESSAGE);
    assert!(transport.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_success_shows_banner_then_resets() {
    let transport = ScriptedTransport::default();
    transport.reply_ok(vehicle_json("v1", "Tata Ace"));
    let client = transport.client();
    let mut controller = FormController::new(AddVehicleForm::new()).with_values(add_vehicle_values());

    let request = controller.begin_submit().unwrap();
    assert_eq!(controller.state(), SubmissionState::Submitting);
    assert!(!controller.can_submit());
    assert!(!controller.inputs_enabled());
    assert!(!controller.set_field(field::NAME, "Edited"));

    let result = client.add_vehicle(&request).await;
    let outcome = controller.finish(result);

    assert_eq!(outcome.output().map(|v| v.id.as_str()), Some("v1"));
    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert!(!controller.can_submit());
    assert_eq!(
        controller.pending_toasts().last().map(|t| t.title.as_str()),
        Some("Vehicle Tata Ace added successfully")
    );
    assert!(!controller.poll_revert(Instant::now()));
    assert_eq!(controller.values().text(field::NAME).as_deref(), Some("Tata Ace"));

    tokio::time::advance(Duration::from_millis(1999)).await;
    assert!(!controller.poll_revert(Instant::now()));

    assert!(controller.settle().await);
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert!(controller.values().is_empty());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_second_submit_while_submitting_is_busy() {
    let mut controller = FormController::new(AddVehicleForm::new()).with_values(add_vehicle_values());
    controller.begin_submit().unwrap();
    assert_eq!(
        controller.begin_submit().unwrap_err(),
        Rejection::Busy(SubmissionState::Submitting)
    );
}

#[tokio::test]
async fn test_conflict_keeps_data_and_returns_to_idle() {
    let transport = ScriptedTransport::default();
    transport.reply(Err(ApiError::http(409)));
    let client = transport.client();
    let values = FormState::new()
        .with(field::VEHICLE_ID, "v1")
        .with(field::CUSTOMER_ID, "cust_42")
        .with(field::FROM_PINCODE, "110001")
        .with(field::TO_PINCODE, "110005")
        .with(field::START_TIME, "2099-01-02T09:30:00Z");
    let mut controller = FormController::new(BookVehicleForm::new()).with_values(values.clone());

    let outcome = controller.submit(&client).await;

    assert!(outcome.error().is_some_and(ApiError::is_conflict));
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.values(), &values);
    let toast = controller.take_toasts().pop().unwrap();
    assert!(toast.is_error());
    assert_eq!(toast.title, status_message(409));
    assert!(controller.can_submit());
}

#[tokio::test]
async fn test_booking_success_message() {
    let transport = ScriptedTransport::default();
    transport.reply_ok(booking_json("b1", "pending"));
    let client = transport.client();
    let mut controller = FormController::new(BookVehicleForm::new()).with_values(
        BookVehicleForm::prefill("v1", &search_values()).with(field::CUSTOMER_ID, "cust_42"),
    );

    let outcome = controller.submit(&client).await;

    assert!(outcome.is_success());
    assert_eq!(
        controller.pending_toasts().last().map(|t| t.title.as_str()),
        Some("Booking confirmed for cust_42")
    );
    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "bookings");
    assert_eq!(request.body.as_ref().unwrap()["vehicleId"], json!("v1"));
}

#[tokio::test]
async fn test_server_field_errors_are_merged_and_cleared_on_edit() {
    let transport = ScriptedTransport::default();
    transport.reply(Err(ApiError::http_with_message(422, "Validation failed").with_field_errors(
        vec![ServerFieldError::new(field::NAME, "A vehicle with this name already exists")],
    )));
    let client = transport.client();
    let mut controller = FormController::new(AddVehicleForm::new()).with_values(add_vehicle_values());

    controller.submit(&client).await;

    assert_eq!(
        controller.field_error(field::NAME),
        Some("A vehicle with this name already exists")
    );
    assert!(controller.set_field(field::NAME, "Tata Ace 2"));
    assert_eq!(controller.field_error(field::NAME), None);
}

#[tokio::test(start_paused = true)]
async fn test_edit_while_succeeded_dismisses_banner() {
    let transport = ScriptedTransport::default();
    transport.reply_ok(vehicle_json("v1", "Tata Ace"));
    let client = transport.client();
    let mut controller = FormController::new(AddVehicleForm::new()).with_values(add_vehicle_values());

    assert!(controller.submit(&client).await.is_success());
    assert_eq!(controller.state(), SubmissionState::Succeeded);

    assert!(controller.set_field(field::NAME, "Eicher Pro"));
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.revert_deadline(), None);
    assert!(!controller.settle().await);
    assert_eq!(controller.values().text(field::NAME).as_deref(), Some("Eicher Pro"));
}

#[tokio::test]
async fn test_search_keeps_values_and_returns_to_idle() {
    let transport = ScriptedTransport::default();
    let mut available = vehicle_json("v1", "Tata Ace");
    available["estimatedRideDurationHours"] = json!(4);
    transport.reply_ok(json!([available]));
    let client = transport.client();
    let mut controller = FormController::new(SearchAvailabilityForm::new()).with_values(search_values());

    let outcome = controller.submit(&client).await;

    assert_eq!(outcome.output().map(Vec::len), Some(1));
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.values(), &search_values());
    assert_eq!(
        transport.requests()[0].query_value("capacityRequired"),
        Some("500")
    );
}

#[tokio::test]
async fn test_network_failure_message() {
    let transport = ScriptedTransport::default();
    let client = transport.client();
    let mut controller = FormController::new(AddVehicleForm::new()).with_values(add_vehicle_values());

    let outcome = controller.submit(&client).await;

    assert!(outcome.error().is_some_and(ApiError::is_connectivity));
    assert_eq!(
        controller.pending_toasts().last().map(|t| t.title.as_str()),
        Some(fleet_lib::error::NETWORK_MESSAGE)
    );
}

#[test]
fn test_finish_without_submit_is_rejected() {
    let mut controller = FormController::new(AddVehicleForm::new());
    let outcome = controller.finish(Err(ApiError::http(500)));
    assert_eq!(outcome.rejection(), Some(&Rejection::NotSubmitting));
    assert!(controller.pending_toasts().is_empty());
}
