//! Health endpoint behavior.

use axum::http::StatusCode;

use crate::support::{TestGateway, body_bytes};

#[tokio::test]
async fn health_is_always_ok() {
    let gateway = TestGateway::new();

    let response = gateway.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response, 1024).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    // Timestamp parses as RFC 3339
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn health_needs_no_token() {
    let gateway = TestGateway::new();

    // No identities registered at all; health still answers
    let response = gateway.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
