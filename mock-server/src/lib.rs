//! Mock of the Server Density v1.3 HTTP API for integration tests.
//!
//! # Design
//! A single `/1.3/{module}/{method}` route dispatches on the (module,
//! method) pair, mirroring how the real service routes calls. Requests
//! missing the `account` / `apikey` query parameters are rejected, POST
//! bodies arrive urlencoded, and `deviceId` is always read from the URL
//! query (the real service resolves devices from the URL regardless of
//! verb). Responses use the v1.3 envelope: `{"status": 1, "data": ...}` on
//! success, `{"status": 2, "error": {"message": ...}}` otherwise.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A monitored device, as the service reports it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Clone, Default)]
pub struct AppState {
    devices: Arc<RwLock<HashMap<String, Device>>>,
    postbacks: Arc<RwLock<HashMap<String, Value>>>,
}

pub fn app() -> Router {
    Router::new()
        .route("/1.3/{module}/{method}", get(handle_get).post(handle_post))
        .with_state(AppState::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ApiResponse = (StatusCode, Json<Value>);

fn ok(data: Value) -> ApiResponse {
    (StatusCode::OK, Json(json!({ "status": 1, "data": data })))
}

fn fail(status: StatusCode, message: &str) -> ApiResponse {
    (
        status,
        Json(json!({ "status": 2, "error": { "message": message } })),
    )
}

fn authorized(query: &HashMap<String, String>) -> bool {
    query.get("account").is_some_and(|v| !v.is_empty())
        && query.get("apikey").is_some_and(|v| !v.is_empty())
}

async fn handle_get(
    State(state): State<AppState>,
    Path((module, method)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResponse {
    if !authorized(&query) {
        return fail(StatusCode::FORBIDDEN, "Invalid API key");
    }

    match (module.as_str(), method.as_str()) {
        ("devices", "list") => {
            let devices = state.devices.read().await;
            let all: Vec<Value> = devices
                .values()
                .map(|d| serde_json::to_value(d).unwrap_or(Value::Null))
                .collect();
            ok(Value::Array(all))
        }
        ("devices", "getbyid") => {
            let Some(device_id) = query.get("deviceId") else {
                return fail(StatusCode::BAD_REQUEST, "deviceId required");
            };
            let devices = state.devices.read().await;
            match devices.get(device_id) {
                Some(device) => ok(serde_json::to_value(device).unwrap_or(Value::Null)),
                None => fail(StatusCode::NOT_FOUND, "Device not found"),
            }
        }
        ("alerts", "list") => ok(json!([])),
        ("mongo", "getreplicaset") => ok(json!({ "replicaSet": [] })),
        _ => fail(
            StatusCode::NOT_FOUND,
            &format!("Service {module}/{method} not found"),
        ),
    }
}

async fn handle_post(
    State(state): State<AppState>,
    Path((module, method)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    Form(form): Form<HashMap<String, String>>,
) -> ApiResponse {
    if !authorized(&query) {
        return fail(StatusCode::FORBIDDEN, "Invalid API key");
    }

    match (module.as_str(), method.as_str()) {
        ("devices", "add") => {
            let Some(name) = form.get("name") else {
                return fail(StatusCode::BAD_REQUEST, "name required");
            };
            let device = Device {
                device_id: Uuid::new_v4().to_string(),
                name: name.clone(),
                ip: form.get("ip").cloned(),
                group: form.get("group").cloned(),
            };
            state
                .devices
                .write()
                .await
                .insert(device.device_id.clone(), device.clone());
            ok(serde_json::to_value(&device).unwrap_or(Value::Null))
        }
        ("devices", "delete") => {
            // deviceId travels in the URL, never the POST body.
            let Some(device_id) = query.get("deviceId") else {
                return fail(StatusCode::BAD_REQUEST, "deviceId required");
            };
            match state.devices.write().await.remove(device_id) {
                Some(_) => ok(json!({ "deviceId": device_id })),
                None => fail(StatusCode::NOT_FOUND, "Device not found"),
            }
        }
        ("metrics", "postback") => {
            let Some(device_id) = query.get("deviceId") else {
                return fail(StatusCode::BAD_REQUEST, "deviceId required");
            };
            let Some(raw_payload) = form.get("payload") else {
                return fail(StatusCode::BAD_REQUEST, "payload required");
            };
            let Ok(payload) = serde_json::from_str::<Value>(raw_payload) else {
                return fail(StatusCode::BAD_REQUEST, "payload must be JSON");
            };
            state
                .postbacks
                .write()
                .await
                .insert(device_id.clone(), payload.clone());
            ok(json!({ "deviceId": device_id, "payload": payload }))
        }
        ("alerts", "pause") | ("alerts", "resume") => match form.get("alertId") {
            Some(alert_id) => ok(json!({ "alertId": alert_id })),
            None => fail(StatusCode::BAD_REQUEST, "alertId required"),
        },
        _ => fail(
            StatusCode::NOT_FOUND,
            &format!("Service {module}/{method} not found"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_serializes_with_camel_case_keys() {
        let device = Device {
            device_id: "abc123".to_string(),
            name: "server1".to_string(),
            ip: None,
            group: Some("web".to_string()),
        };
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["deviceId"], "abc123");
        assert_eq!(json["name"], "server1");
        assert_eq!(json["group"], "web");
        assert!(json.get("ip").is_none());
    }

    #[test]
    fn device_roundtrips_through_json() {
        let device = Device {
            device_id: "abc123".to_string(),
            name: "server1".to_string(),
            ip: Some("10.0.0.1".to_string()),
            group: None,
        };
        let json = serde_json::to_string(&device).unwrap();
        let back: Device = serde_json::from_str(&json).unwrap();
        assert_eq!(back.device_id, device.device_id);
        assert_eq!(back.ip, device.ip);
    }
}
