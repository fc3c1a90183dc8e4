//! Tests for the counter endpoint against a mocked Stacks API

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use mockito::{mock, Matcher};
use serde_json::{json, Value};
use tower::ServiceExt;

use stacks_counter_relay::{api::create_router, config::Config, AppState};

const ADDRESS: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

fn create_test_app(api_url: &str, contract_name: &str) -> Router {
    let config = Config {
        contract_address: ADDRESS.to_string(),
        contract_name: contract_name.to_string(),
        stacks_api_url: api_url.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    };
    create_router(AppState::new(config).unwrap())
}

fn call_read_path(contract_name: &str) -> String {
    format!("/v2/contracts/call-read/{}/{}/get-count", ADDRESS, contract_name)
}

async fn get_count(app: Router) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/get-count")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_prefixed_int_result() {
    let upstream = mock("POST", call_read_path("counter-prefixed").as_str())
        .match_body(Matcher::Json(json!({"sender": ADDRESS, "arguments": []})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"okay": true, "result": "(ok u42)"}"#)
        .create();

    let app = create_test_app(&mockito::server_url(), "counter-prefixed");
    let (status, body) = get_count(app).await;

    upstream.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"count": 42, "raw_debug": "(ok u42)", "encoding": "prefixed-int"})
    );
}

#[tokio::test]
async fn test_serialized_hex_result() {
    let upstream = mock("POST", call_read_path("counter-hex").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"okay": true, "result": "0x0100000000000000000000000000000007"}"#)
        .create();

    let app = create_test_app(&mockito::server_url(), "counter-hex");
    let (status, body) = get_count(app).await;

    upstream.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(7));
    assert_eq!(body["encoding"], json!("hex-encoded"));
    assert_eq!(body["raw_debug"], json!("0x0100000000000000000000000000000007"));
}

#[tokio::test]
async fn test_sentinel_numeric_result() {
    let _upstream = mock("POST", call_read_path("counter-sentinel").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": 610126283889242664989830671125160403140615}"#)
        .create();

    let app = create_test_app(&mockito::server_url(), "counter-sentinel");
    let (status, body) = get_count(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(7));
    assert_eq!(body["encoding"], json!("bare-numeric"));
    assert_eq!(
        body["raw_debug"].to_string(),
        "610126283889242664989830671125160403140615"
    );
}

#[tokio::test]
async fn test_missing_result_is_unparseable() {
    let _upstream = mock("POST", call_read_path("counter-empty").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"okay": false, "cause": "NoSuchContract"}"#)
        .create();

    let app = create_test_app(&mockito::server_url(), "counter-empty");
    let (status, body) = get_count(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));
    assert_eq!(body["encoding"], json!("unparseable"));
}

#[tokio::test]
async fn test_upstream_error_status_is_reported() {
    let _upstream = mock("POST", call_read_path("counter-down").as_str())
        .with_status(503)
        .with_body("service unavailable")
        .create();

    let app = create_test_app(&mockito::server_url(), "counter-down");
    let (status, body) = get_count(app).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("503"));
    assert!(body.get("count").is_none());
}

#[tokio::test]
async fn test_non_json_body_is_reported() {
    let _upstream = mock("POST", call_read_path("counter-html").as_str())
        .with_status(200)
        .with_body("<html>oops</html>")
        .create();

    let app = create_test_app(&mockito::server_url(), "counter-html");
    let (status, body) = get_count(app).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
}

#[tokio::test]
async fn test_unreachable_api_is_reported() {
    // Nothing listens on port 1
    let app = create_test_app("http://127.0.0.1:1", "counter-offline");
    let (status, body) = get_count(app).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Stacks API"));
}

#[tokio::test]
async fn test_root_and_health() {
    let app = create_test_app("http://127.0.0.1:1", "unused");
    for uri in ["/", "/health"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], json!("ok"));
    }
}
