//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fleet_lib::FleetClient;
use fleet_lib::error::ApiError;
use fleet_lib::transport::{ApiRequest, ApiResponse, Transport};
use serde_json::{Value, json};

#[derive(Default)]
struct Scripted {
    replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

/// Replays queued replies and records every request it receives.
#[derive(Clone, Default)]
pub struct ScriptedTransport(Arc<Scripted>);

impl ScriptedTransport {
    pub fn reply(&self, reply: Result<ApiResponse, ApiError>) -> &Self {
        self.0.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn reply_ok(&self, data: Value) -> &Self {
        self.reply(Ok(ApiResponse::ok(data)))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.0.requests.lock().unwrap().clone()
    }

    pub fn client(&self) -> FleetClient {
        FleetClient::new(self.clone())
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

pub fn vehicle_json(id: &str, name: &str) -> Value {
    json!({"_id": id, "name": name, "capacityKg": 750, "tyres": 4, "status": "active"})
}

pub fn booking_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "vehicleId": "v1",
        "customerId": "cust_42",
        "fromPincode": "110001",
        "toPincode": "110005",
        "startTime": "2099-01-02T09:30:00Z",
        "endTime": "2099-01-02T13:30:00Z",
        "estimatedRideDurationHours": 4,
        "status": status
    })
}
