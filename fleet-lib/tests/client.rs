//! Tests for endpoint request shapes and response decoding over a scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fleet_lib::FleetClient;
use fleet_lib::api::{BookingQuery, VehicleQuery};
use fleet_lib::error::ApiError;
use fleet_lib::model::{AvailabilityQuery, BookingStatus, NewVehicle, VehicleStatus};
use fleet_lib::transport::{ApiRequest, ApiResponse, Method, Transport};
use serde_json::json;

#[derive(Default)]
struct Scripted {
    replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

#[derive(Clone, Default)]
struct ScriptedTransport(Arc<Scripted>);

impl ScriptedTransport {
    fn reply(&self, reply: Result<ApiResponse, ApiError>) -> &Self {
        self.0.replies.lock().unwrap().push_back(reply);
        self
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.0.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.0.requests.lock().unwrap().push(request);
        self.0
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())))
    }
}

fn vehicle_json() -> serde_json::Value {
    json!({"_id": "v1", "name": "Tata Ace", "capacityKg": 750, "tyres": 4, "status": "active"})
}

#[tokio::test]
async fn test_add_vehicle_posts_camel_case_body() {
    let transport = ScriptedTransport::default();
    transport.reply(Ok(ApiResponse::ok(vehicle_json())));
    let client = FleetClient::new(transport.clone());

    let vehicle = client
        .add_vehicle(&NewVehicle {
            name: "Tata Ace".into(),
            capacity_kg: 750,
            tyres: 4,
        })
        .await
        .unwrap();

    assert_eq!(vehicle.id, "v1");
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "vehicles");
    assert_eq!(
        requests[0].body,
        Some(json!({"name": "Tata Ace", "capacityKg": 750, "tyres": 4}))
    );
}

#[tokio::test]
async fn test_available_vehicles_query_params() {
    let transport = ScriptedTransport::default();
    let mut available = vehicle_json();
    available["estimatedRideDurationHours"] = json!(4);
    transport.reply(Ok(ApiResponse::ok(json!([available]))));
    let client = FleetClient::new(transport.clone());

    let results = client
        .available_vehicles(&AvailabilityQuery {
            capacity_required: 500,
            from_pincode: "110001".into(),
            to_pincode: "110005".into(),
            start_time: Utc.with_ymd_and_hms(2030, 1, 2, 9, 30, 0).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].estimated_ride_duration_hours, 4);

    let request = &transport.requests()[0];
    assert_eq!(request.path, "vehicles/available");
    assert_eq!(request.query_value("capacityRequired"), Some("500"));
    assert_eq!(request.query_value("fromPincode"), Some("110001"));
    assert_eq!(request.query_value("startTime"), Some("2030-01-02T09:30:00Z"));
}

#[tokio::test]
async fn test_list_bookings_with_filters() {
    let transport = ScriptedTransport::default();
    transport.reply(Ok(ApiResponse::ok(
        json!({"items": [], "page": 2, "limit": 10, "total": 12}),
    )));
    let client = FleetClient::new(transport.clone());

    let page = client
        .list_bookings(
            &BookingQuery::default()
                .page(2)
                .status(BookingStatus::InProgress)
                .customer("cust_9"),
        )
        .await
        .unwrap();

    assert_eq!(page.total_pages(), 2);
    let request = &transport.requests()[0];
    assert_eq!(request.query_value("page"), Some("2"));
    assert_eq!(request.query_value("status"), Some("in_progress"));
    assert_eq!(request.query_value("customerId"), Some("cust_9"));
}

#[tokio::test]
async fn test_list_vehicles_without_status_omits_param() {
    let transport = ScriptedTransport::default();
    transport.reply(Ok(ApiResponse::ok(
        json!({"items": [vehicle_json()], "page": 1, "limit": 10, "total": 1}),
    )));
    let client = FleetClient::new(transport.clone());

    let page = client.list_vehicles(&VehicleQuery::default()).await.unwrap();

    assert_eq!(page.items()[0].name, "Tata Ace");
    assert_eq!(transport.requests()[0].query_value("status"), None);
}

#[tokio::test]
async fn test_status_update_returns_patch() {
    let transport = ScriptedTransport::default();
    transport.reply(Ok(ApiResponse::ok(json!({"status": "maintenance"}))));
    let client = FleetClient::new(transport.clone());

    let patch = client
        .update_vehicle_status("v1", VehicleStatus::Maintenance)
        .await
        .unwrap();

    assert_eq!(patch.status, Some(VehicleStatus::Maintenance));
    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.path, "vehicles/v1/status");
    assert_eq!(request.body, Some(json!({"status": "maintenance"})));
}

#[tokio::test]
async fn test_cancel_without_body_confirms_cancellation() {
    let transport = ScriptedTransport::default();
    transport.reply(Ok(ApiResponse::ok(serde_json::Value::Null)));
    let client = FleetClient::new(transport.clone());

    let patch = client.cancel_booking("b7").await.unwrap();

    assert_eq!(patch.status, Some(BookingStatus::Cancelled));
    assert_eq!(transport.requests()[0].method, Method::Delete);
}

#[tokio::test]
async fn test_malformed_data_is_parse_error() {
    let transport = ScriptedTransport::default();
    transport.reply(Ok(ApiResponse::ok(json!({"unexpected": true}))));
    let client = FleetClient::new(transport);

    let err = client.list_vehicles(&VehicleQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse { body: Some(_), .. }));
}

#[tokio::test]
async fn test_server_errors_pass_through() {
    let transport = ScriptedTransport::default();
    transport.reply(Err(ApiError::http_with_message(409, "Vehicle already booked")));
    let client = FleetClient::new(transport);

    let err = client.cancel_booking("b1").await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.user_message(), "Vehicle already booked");
}
