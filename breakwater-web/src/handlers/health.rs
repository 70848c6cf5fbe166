//! Liveness endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// `GET /health` - always 200 with a timestamp, no collaborator touches.
pub async fn health_check() -> impl IntoResponse {
    let health_info = serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health_info))
}
