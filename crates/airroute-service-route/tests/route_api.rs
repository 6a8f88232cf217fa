use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use airroute_lib::GraphStore;
use airroute_service_route::{app, router};
use airroute_service_shared::test_utils::{fixture_airports, test_state};
use airroute_service_shared::{AppState, MetricsConfig};

fn server() -> TestServer {
    TestServer::new(app(test_state())).expect("test server starts")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn route_returns_itinerary_with_summary() {
    let response = server()
        .get("/route")
        .add_query_param("src", fixture_airports::TLL)
        .add_query_param("dest", fixture_airports::DUB)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let stops = body["data"].as_array().expect("data is an array");
    let codes: Vec<&str> = stops.iter().map(|s| s["iata"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["TLL", "ARN", "DUB"]);
    assert_eq!(stops[1]["name"], "Stockholm-Arlanda Airport");
    assert_close(stops[1]["distance"].as_f64().unwrap(), 390.5543822496502);

    assert_eq!(body["hops"], 2);
    assert_close(body["distance"].as_f64().unwrap(), 2015.305541839799);
    assert_eq!(body["content_type"], "application/json");
}

#[tokio::test]
async fn codes_are_upper_cased() {
    let response = server()
        .get("/route")
        .add_query_param("src", "tll")
        .add_query_param("dest", "jfk")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["hops"], 3);
    assert_close(body["distance"].as_f64().unwrap(), 7488.372433848557);
}

#[tokio::test]
async fn same_airport_returns_empty_itinerary() {
    let response = server()
        .get("/route")
        .add_query_param("src", "TLL")
        .add_query_param("dest", "TLL")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], serde_json::json!([]));
    assert_eq!(body["hops"], 0);
    assert_eq!(body["distance"], 0.0);
}

#[tokio::test]
async fn configured_hop_ceiling_applies() {
    let state = test_state().with_max_hops(2);
    let server = TestServer::new(app(state)).expect("test server starts");

    let response = server
        .get("/route")
        .add_query_param("src", fixture_airports::TLL)
        .add_query_param("dest", fixture_airports::JFK)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn missing_destination_is_bad_request() {
    let response = server()
        .get("/route")
        .add_query_param("src", "TLL")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/invalid-request");
    assert!(body["detail"].as_str().unwrap().contains("'dest'"));
}

#[tokio::test]
async fn missing_parameters_are_bad_request() {
    let response = server().get("/route").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("'src'"));
}

#[tokio::test]
async fn unknown_airport_is_not_found_problem() {
    let response = server()
        .get("/route")
        .add_query_param("src", "NUBLU")
        .add_query_param("dest", "TLL")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.header("content-type"),
        HeaderValue::from_static("application/problem+json")
    );

    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/unknown-airport");
    assert_eq!(body["status"], 404);
    assert_eq!(body["detail"], "Airport by NUBLU code not found");
}

#[tokio::test]
async fn unknown_destination_is_named() {
    let response = server()
        .get("/route")
        .add_query_param("src", "TLL")
        .add_query_param("dest", "777")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Airport by 777 code not found");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = server()
        .get("/route")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-abc"),
        )
        .add_query_param("src", "NUBLU")
        .add_query_param("dest", "TLL")
        .await;

    assert_eq!(
        response.header("x-request-id"),
        HeaderValue::from_static("req-abc")
    );
    let body: Value = response.json();
    assert_eq!(body["instance"], "req-abc");
}

#[tokio::test]
async fn liveness_is_always_ok() {
    let response = server().get("/health/live").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn readiness_reports_graph_size() {
    let response = server().get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["airports_loaded"], 10);
    assert_eq!(body["connections_loaded"], 24);
}

#[tokio::test]
async fn readiness_fails_on_empty_graph() {
    let state = AppState::from_graph(GraphStore::new());
    let server = TestServer::new(app(state)).expect("test server starts");

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert!(body["status"].as_str().unwrap().starts_with("not_ready"));
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    let response = server().get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().contains('#') || response.text().is_empty());
}

#[tokio::test]
async fn metrics_endpoint_can_be_disabled() {
    let config = MetricsConfig {
        enabled: false,
        ..MetricsConfig::default()
    };
    let server = TestServer::new(router(test_state(), &config)).expect("test server starts");

    let response = server.get("/metrics").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
