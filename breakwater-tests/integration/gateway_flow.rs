//! Status-code taxonomy of the delivery pipeline.
//!
//! Each stage of the `/video` orchestration fails fast into exactly one
//! status: 400 missing params, 401 invalid session, 403 denied, 404 for
//! unknown/unresolvable/empty assets.

use axum::http::StatusCode;
use breakwater_core::auth::Role;

use crate::support::{TestGateway, body_bytes, future_epoch, past_epoch};

#[tokio::test]
async fn missing_parameters_are_400() {
    let gateway = TestGateway::new();

    let response = gateway.get("/video", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = gateway.get("/video?id=v1", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = gateway.get("/video?token=tok", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty values count as missing
    let response = gateway.get("/video?id=&token=tok", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_token_is_401() {
    let gateway = TestGateway::new();
    gateway.add_resource("v1", "owner", Role::User, b"data");

    let response = gateway.get("/video?id=v1&token=no-such-token", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_resource_is_404() {
    let gateway = TestGateway::new();
    let token = gateway.add_caller("c1", Role::User, None);

    let response = gateway
        .get(&format!("/video?id=ghost&token={token}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unentitled_caller_is_403() {
    let gateway = TestGateway::new();
    let token = gateway.add_caller("c1", Role::User, None);
    gateway.add_resource("v1", "someone-else", Role::User, b"data");

    let response = gateway
        .get(&format!("/video?id=v1&token={token}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_bytes(response, 256).await;
    let message = String::from_utf8(body.to_vec()).unwrap();
    assert!(message.contains("payment required"));
}

#[tokio::test]
async fn admin_owner_subscriber_and_buyer_are_allowed() {
    let gateway = TestGateway::new();
    gateway.add_resource("premium", "curator", Role::Admin, b"premium-bytes");
    gateway.add_resource("mine", "owner-1", Role::User, b"owner-bytes");
    gateway.add_resource("bought", "seller", Role::User, b"bought-bytes");

    let admin = gateway.add_caller("root", Role::Admin, None);
    let owner = gateway.add_caller("owner-1", Role::User, None);
    let subscriber = gateway.add_caller("sub-1", Role::User, Some(future_epoch()));
    let buyer = gateway.add_caller("buyer-1", Role::User, None);
    gateway.purchases.record_purchase("buyer-1", "bought");

    for (token, id) in [
        (&admin, "premium"),
        (&admin, "mine"),
        (&owner, "mine"),
        (&subscriber, "premium"),
        (&buyer, "bought"),
    ] {
        let response = gateway.get(&format!("/video?id={id}&token={token}"), None).await;
        assert_eq!(response.status(), StatusCode::OK, "token={token} id={id}");
    }
}

#[tokio::test]
async fn expired_subscription_does_not_unlock_premium() {
    let gateway = TestGateway::new();
    gateway.add_resource("premium", "curator", Role::Admin, b"premium-bytes");
    let lapsed = gateway.add_caller("lapsed", Role::User, Some(past_epoch()));

    let response = gateway
        .get(&format!("/video?id=premium&token={lapsed}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn subscription_does_not_unlock_user_owned_content() {
    let gateway = TestGateway::new();
    gateway.add_resource("plain", "someone", Role::User, b"bytes");
    let subscriber = gateway.add_caller("sub-1", Role::User, Some(future_epoch()));

    let response = gateway
        .get(&format!("/video?id=plain&token={subscriber}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unresolvable_reference_is_404() {
    let gateway = TestGateway::new();
    let token = gateway.add_caller("c1", Role::Admin, None);
    gateway.add_dangling_resource("v1", "c1");

    let response = gateway
        .get(&format!("/video?id=v1&token={token}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn zero_length_file_is_404_with_and_without_range() {
    let gateway = TestGateway::new();
    let token = gateway.add_caller("c1", Role::Admin, None);
    gateway.add_resource("empty", "c1", Role::User, b"");

    let response = gateway
        .get(&format!("/video?id=empty&token={token}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = gateway
        .get(&format!("/video?id=empty&token={token}"), Some("bytes=0-10"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn library_root_fallback_resolves_when_base_dir_misses() {
    use breakwater_core::catalog::{GlobalSettings, MediaResource};

    let gateway = TestGateway::new();
    let token = gateway.add_caller("c1", Role::Admin, None);

    // Media lives only under the library root, not the base directory
    let library = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(library.path().join("archive")).unwrap();
    std::fs::write(library.path().join("archive/old.mp4"), b"archived-bytes").unwrap();

    gateway.settings.replace(GlobalSettings {
        library_root: Some(library.path().to_string_lossy().into_owned()),
    });
    gateway.catalog.insert(MediaResource {
        id: "old".to_string(),
        storage_reference: "/api/media/archive/old.mp4".to_string(),
        owner_id: "c1".to_string(),
        owner_role: Role::User,
    });

    let response = gateway
        .get(&format!("/video?id=old&token={token}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response, 1024).await;
    assert_eq!(body.as_ref(), b"archived-bytes");
}
