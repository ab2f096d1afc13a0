use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

const AUTH: &str = "account=example.serverdensity.com&apikey=APIKEY";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

// --- auth gate ---

#[tokio::test]
async fn missing_apikey_is_forbidden() {
    let app = app();
    let resp = app
        .oneshot(get_request(
            "/1.3/devices/list?account=example.serverdensity.com",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 2);
    assert_eq!(body["error"]["message"], "Invalid API key");
}

// --- devices ---

#[tokio::test]
async fn devices_list_starts_empty() {
    let app = app();
    let resp = app
        .oneshot(get_request(&format!("/1.3/devices/list?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 1);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn device_add_get_delete_lifecycle() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(form_request(
            &format!("/1.3/devices/add?{AUTH}"),
            "name=server1&group=web",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["name"], "server1");
    assert_eq!(body["data"]["group"], "web");
    let device_id = body["data"]["deviceId"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(get_request(&format!(
            "/1.3/devices/getbyid?{AUTH}&deviceId={device_id}"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["deviceId"], device_id.as_str());

    // deviceId is read from the URL on POST, body stays empty.
    let resp = app
        .clone()
        .oneshot(form_request(
            &format!("/1.3/devices/delete?{AUTH}&deviceId={device_id}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(get_request(&format!(
            "/1.3/devices/getbyid?{AUTH}&deviceId={device_id}"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_by_id_without_device_id_is_bad_request() {
    let app = app();
    let resp = app
        .oneshot(get_request(&format!("/1.3/devices/getbyid?{AUTH}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- metrics ---

#[tokio::test]
async fn postback_echoes_parsed_payload() {
    let app = app();
    let resp = app
        .oneshot(form_request(
            &format!("/1.3/metrics/postback?{AUTH}&deviceId=abc123"),
            r#"payload={"cpu":50}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["deviceId"], "abc123");
    assert_eq!(body["data"]["payload"]["cpu"], 50);
}

#[tokio::test]
async fn postback_rejects_non_json_payload() {
    let app = app();
    let resp = app
        .oneshot(form_request(
            &format!("/1.3/metrics/postback?{AUTH}&deviceId=abc123"),
            "payload=not json",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- alerts ---

#[tokio::test]
async fn alerts_pause_requires_alert_id() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(form_request(&format!("/1.3/alerts/pause?{AUTH}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .oneshot(form_request(
            &format!("/1.3/alerts/pause?{AUTH}"),
            "alertId=a1",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["alertId"], "a1");
}

// --- unknown calls ---

#[tokio::test]
async fn unknown_service_is_not_found() {
    let app = app();
    let resp = app
        .oneshot(get_request(&format!("/1.3/unknown/thing?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 2);
}
