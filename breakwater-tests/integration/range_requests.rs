//! HTTP range semantics through the full gateway.

use axum::http::{StatusCode, header};
use breakwater_core::auth::Role;

use crate::support::{TestGateway, body_bytes};

/// A 1000-byte file with a recognizable pattern.
fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

async fn serving_gateway(data: &[u8]) -> (TestGateway, String) {
    let gateway = TestGateway::new();
    let token = gateway.add_caller("viewer", Role::Admin, None);
    gateway.add_resource("v1", "viewer", Role::User, data);
    (gateway, token)
}

#[tokio::test]
async fn no_range_streams_full_body() {
    let data = pattern(1000);
    let (gateway, token) = serving_gateway(&data).await;

    let response = gateway.get(&format!("/video?id=v1&token={token}"), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_LENGTH).unwrap(),
        "1000"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "video/mp4"
    );
    assert_eq!(
        response.headers().get(header::ACCEPT_RANGES).unwrap(),
        "bytes"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );

    let body = body_bytes(response, 2048).await;
    assert_eq!(body.as_ref(), data.as_slice());
}

#[tokio::test]
async fn closed_range_returns_exact_window() {
    let data = pattern(1000);
    let (gateway, token) = serving_gateway(&data).await;

    let response = gateway
        .get(&format!("/video?id=v1&token={token}"), Some("bytes=0-99"))
        .await;

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        response.headers().get(header::CONTENT_RANGE).unwrap(),
        "bytes 0-99/1000"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_LENGTH).unwrap(),
        "100"
    );

    let body = body_bytes(response, 2048).await;
    assert_eq!(body.as_ref(), &data[0..=99]);
}

#[tokio::test]
async fn open_range_runs_to_last_byte() {
    let data = pattern(1000);
    let (gateway, token) = serving_gateway(&data).await;

    let response = gateway
        .get(&format!("/video?id=v1&token={token}"), Some("bytes=900-"))
        .await;

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        response.headers().get(header::CONTENT_RANGE).unwrap(),
        "bytes 900-999/1000"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_LENGTH).unwrap(),
        "100"
    );

    let body = body_bytes(response, 2048).await;
    assert_eq!(body.as_ref(), &data[900..]);
}

#[tokio::test]
async fn out_of_bounds_range_is_416_with_star_range() {
    let data = pattern(1000);
    let (gateway, token) = serving_gateway(&data).await;

    let response = gateway
        .get(
            &format!("/video?id=v1&token={token}"),
            Some("bytes=1000-1005"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(
        response.headers().get(header::CONTENT_RANGE).unwrap(),
        "bytes */1000"
    );

    let body = body_bytes(response, 64).await;
    assert!(body.is_empty());
}

#[tokio::test]
async fn multi_range_is_rejected_with_416() {
    let data = pattern(1000);
    let (gateway, token) = serving_gateway(&data).await;

    let response = gateway
        .get(
            &format!("/video?id=v1&token={token}"),
            Some("bytes=0-10,20-30"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(
        response.headers().get(header::CONTENT_RANGE).unwrap(),
        "bytes */1000"
    );
}

#[tokio::test]
async fn repeated_identical_requests_are_byte_identical() {
    let data = pattern(1000);
    let (gateway, token) = serving_gateway(&data).await;
    let uri = format!("/video?id=v1&token={token}");

    let first = gateway.get(&uri, Some("bytes=100-299")).await;
    let second = gateway.get(&uri, Some("bytes=100-299")).await;

    assert_eq!(first.status(), second.status());
    assert_eq!(
        first.headers().get(header::CONTENT_RANGE),
        second.headers().get(header::CONTENT_RANGE)
    );

    let first_body = body_bytes(first, 2048).await;
    let second_body = body_bytes(second, 2048).await;
    assert_eq!(first_body, second_body);
    assert_eq!(first_body.as_ref(), &data[100..=299]);
}

#[tokio::test]
async fn audio_extension_maps_to_audio_mime() {
    let gateway = TestGateway::new();
    let token = gateway.add_caller("viewer", Role::Admin, None);

    std::fs::write(gateway.media_dir.path().join("track.flac"), b"flac-bytes").unwrap();
    gateway.catalog.insert(breakwater_core::catalog::MediaResource {
        id: "track".to_string(),
        storage_reference: "/api/media/track.flac".to_string(),
        owner_id: "viewer".to_string(),
        owner_role: Role::User,
    });

    let response = gateway
        .get(&format!("/video?id=track&token={token}"), None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/flac"
    );
}
