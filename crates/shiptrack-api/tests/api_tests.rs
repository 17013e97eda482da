//! Router-level tests against a canned carrier.
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shiptrack_api::{
    carrier::{CarrierClient, CarrierError},
    create_app,
    error::{MSG_GENERIC, MSG_INCOMPLETE},
    sanitize::{MSG_INVALID_FORMAT, MSG_INVALID_LENGTH},
    AppState,
};
use tower::ServiceExt;

enum Canned {
    Body(Value),
    Fail(fn() -> CarrierError),
}

struct FakeCarrier {
    canned: Canned,
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl CarrierClient for FakeCarrier {
    async fn track(&self, tracking_number: &str) -> Result<Value, CarrierError> {
        self.seen.lock().unwrap().push(tracking_number.to_string());
        match &self.canned {
            Canned::Body(body) => Ok(body.clone()),
            Canned::Fail(make) => Err(make()),
        }
    }
}

fn fixture(name: &str) -> Value {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    let path = workspace_root.join("testing/fixtures/carrier").join(name);
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn setup(canned: Canned) -> (Router, Arc<FakeCarrier>, AppState) {
    let carrier = Arc::new(FakeCarrier {
        canned,
        seen: Mutex::new(Vec::new()),
    });
    let state = AppState::new(carrier.clone()).unwrap();
    (create_app(state.clone()), carrier, state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, text) = send(app, req).await;
    (status, serde_json::from_str(&text).unwrap())
}

#[tokio::test]
async fn test_track_passes_carrier_body_through() {
    let (app, carrier, state) = setup(Canned::Body(fixture("delivered.json")));

    let (status, body) = send_json(
        app,
        post_json("/v1/track", json!({ "trackingNumber": " D7001-2345 " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, fixture("delivered.json"));
    assert_eq!(*carrier.seen.lock().unwrap(), vec!["D70012345".to_string()]);
    assert_eq!(state.metrics.count("track", "found"), 1);
}

#[tokio::test]
async fn test_track_not_found_is_still_200() {
    let (app, _, state) = setup(Canned::Body(fixture("not_found.json")));

    let (status, body) =
        send_json(app, post_json("/v1/track", json!({ "trackingNumber": "D70099999" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusFlag"], false);
    assert_eq!(body["errorDetails"], "Shipment not found");
    assert_eq!(state.metrics.count("track", "not_found"), 1);
}

#[tokio::test]
async fn test_invalid_tracking_numbers_rejected() {
    let cases = [
        (json!({ "trackingNumber": "D70" }), MSG_INVALID_LENGTH),
        (json!({ "trackingNumber": "a-b-c-d" }), MSG_INVALID_LENGTH),
        (json!({ "trackingNumber": "9".repeat(21) }), MSG_INVALID_LENGTH),
        (json!({ "trackingNumber": 70012345 }), MSG_INVALID_FORMAT),
        (json!({}), MSG_INVALID_FORMAT),
    ];

    for (payload, message) in cases {
        let (app, carrier, _) = setup(Canned::Body(fixture("delivered.json")));
        let (status, body) = send_json(app, post_json("/v1/track", payload.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "for {}", payload);
        assert_eq!(body, json!({ "statusFlag": false, "errorDetails": message }));
        assert!(carrier.seen.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_unparseable_body_rejected() {
    let (app, carrier, state) = setup(Canned::Body(fixture("delivered.json")));
    let req = Request::builder()
        .method(Method::POST)
        .uri("/v1/track")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send_json(app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorDetails"], MSG_INVALID_FORMAT);
    assert!(carrier.seen.lock().unwrap().is_empty());
    assert_eq!(state.metrics.count("track", "rejected"), 1);
}

#[tokio::test]
async fn test_carrier_failure_is_generic_500() {
    let (app, _, state) = setup(Canned::Fail(|| {
        CarrierError::Transport("connection reset by carrier.internal".to_string())
    }));

    let (status, body) =
        send_json(app, post_json("/v1/track", json!({ "trackingNumber": "D70012345" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "statusFlag": false, "errorDetails": MSG_GENERIC }));
    assert_eq!(state.metrics.count("track", "upstream_error"), 1);
}

#[tokio::test]
async fn test_timeline_orders_and_groups() {
    let (app, _, state) = setup(Canned::Body(fixture("delivered.json")));

    let (status, body) =
        send_json(app, post_json("/v1/timeline", json!({ "trackingNumber": "D70012345" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusFlag"], true);
    assert_eq!(body["header"]["shipmentNo"], "D70012345");
    assert!(body["fetchedAt"].is_string());

    let items = body["items"].as_array().unwrap();
    let shape: Vec<&str> = items
        .iter()
        .map(|item| match item["kind"].as_str().unwrap() {
            "event" => item["code"].as_str().unwrap(),
            _ => "GROUP",
        })
        .collect();
    assert_eq!(shape, ["DLV", "OUTDLV", "PCUP", "GROUP", "BKD"]);

    let group: Vec<&str> = items[3]["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert_eq!(group, ["IBMD", "OBMD"]);
    assert_eq!(state.metrics.count("timeline", "found"), 1);
}

#[tokio::test]
async fn test_timeline_not_found_is_404() {
    let (app, _, _) = setup(Canned::Body(fixture("not_found.json")));

    let (status, body) =
        send_json(app, post_json("/v1/timeline", json!({ "trackingNumber": "D70099999" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "statusFlag": false, "errorDetails": "Shipment not found" }));
}

#[tokio::test]
async fn test_not_found_with_odd_payload_is_404() {
    let carrier_body = json!({
        "statusFlag": false,
        "errorDetails": "Shipment not found",
        "trackHeader": "",
        "trackDetails": ""
    });

    let (app, _, state) = setup(Canned::Body(carrier_body.clone()));
    let (status, body) =
        send_json(app, post_json("/v1/timeline", json!({ "trackingNumber": "D70099999" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorDetails"], "Shipment not found");
    assert_eq!(state.metrics.count("timeline", "not_found"), 1);

    let (app, _, _) = setup(Canned::Body(carrier_body));
    let (status, _) = send_json(app, get("/track/D70099999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_timeline_without_events_is_502() {
    let (app, _, state) = setup(Canned::Body(fixture("empty_events.json")));

    let (status, body) =
        send_json(app, post_json("/v1/timeline", json!({ "trackingNumber": "D70012345" }))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["errorDetails"], MSG_INCOMPLETE);
    assert_eq!(state.metrics.count("timeline", "malformed"), 1);
}

#[tokio::test]
async fn test_page_renders_html() {
    let (app, carrier, _) = setup(Canned::Body(fixture("delivered.json")));

    let response = app.oneshot(get("/track/D70012345?expanded=true")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("D70012345"));
    assert!(html.contains("<details open"));
    assert!(html.contains("IN TRANSIT (2 updates)"));
    assert_eq!(*carrier.seen.lock().unwrap(), vec!["D70012345".to_string()]);
}

#[tokio::test]
async fn test_page_collapsed_by_default() {
    let (app, _, _) = setup(Canned::Body(fixture("delivered.json")));

    let (status, html) = send(app, get("/track/D70012345")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<details>"));
    assert!(!html.contains("<details open"));
}

#[tokio::test]
async fn test_page_rejects_short_number() {
    let (app, carrier, _) = setup(Canned::Body(fixture("delivered.json")));

    let (status, body) = send_json(app, get("/track/D70")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorDetails"], MSG_INVALID_LENGTH);
    assert!(carrier.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _, _) = setup(Canned::Body(fixture("delivered.json")));
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/track")
        .header(header::ORIGIN, "https://shop.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn test_health_and_request_id() {
    let (app, _, _) = setup(Canned::Body(fixture("delivered.json")));

    let response = app.oneshot(get("/v1/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint_reports_lookups() {
    let (app, _, _) = setup(Canned::Body(fixture("delivered.json")));

    let (status, _) = send(
        app.clone(),
        post_json("/v1/track", json!({ "trackingNumber": "D70012345" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = send(app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(text
        .lines()
        .any(|l| l.starts_with("shiptrack_lookups_total{") && l.contains("route=\"track\"") && l.ends_with(" 1")));
}
