//! The `/video` delivery handler.
//!
//! Orchestration order matters: session validation before any resource
//! lookups, metadata-only access rules before the purchase-ledger query,
//! and the zero-length check before any range logic runs.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Response, header};
use breakwater_core::auth::identity::AuthError;
use breakwater_core::auth::{AccessDecision, access};
use breakwater_core::storage::{FsProbe, ResolvedFile, resolver};
use breakwater_core::streaming::{parse_range, serve_file};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::server::AppState;

/// Query parameters for delivery requests.
#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    /// Resource identifier
    pub id: Option<String>,
    /// Opaque session token
    pub token: Option<String>,
}

/// `GET /video?id=<resourceId>&token=<sessionToken>`
///
/// Streams the resource's bytes with full byte-range support, or fails
/// fast with the precise status code for the stage that rejected the
/// request (400/401/403/404/416/500).
pub async fn stream_video(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
    headers: HeaderMap,
) -> Result<Response<Body>, GatewayError> {
    let id = require_param(query.id, "id")?;
    let token = require_param(query.token, "token")?;

    let caller = state
        .session_validator()
        .validate(&token)
        .await
        .map_err(|e| match e {
            AuthError::InvalidSession => GatewayError::InvalidSession,
            AuthError::Collaborator(e) => GatewayError::from(e),
        })?;

    // Resource and settings lookups are independent; overlap them
    let (resource, settings) = tokio::join!(
        state.catalog.resource_by_id(&id),
        state.settings.global_settings(),
    );
    let resource = resource?.ok_or(GatewayError::NotFound)?;
    let settings = settings?;

    let now_epoch = chrono::Utc::now().timestamp();
    let decision = match access::metadata_grant(&caller, &resource, now_epoch) {
        Some(reason) => AccessDecision::Granted(reason),
        None => {
            // Only the purchase rule remains; now the ledger query is worth it
            let purchases = state
                .purchases
                .purchases_for(&caller.id, &resource.id)
                .await?;
            access::decide(&caller, &resource, &purchases, now_epoch)
        }
    };

    let grant = match decision {
        AccessDecision::Granted(reason) => reason,
        AccessDecision::Denied(reason) => {
            warn!(
                caller = %caller.id,
                resource = %resource.id,
                "access denied: {}",
                reason.message()
            );
            return Err(GatewayError::AccessDenied(reason.message()));
        }
    };
    debug!(caller = %caller.id, resource = %resource.id, ?grant, "access granted");

    let library_root = settings
        .library_root
        .or_else(|| state.config.storage.default_library_root.clone());
    let path = resolver::resolve(
        &resource.storage_reference,
        &state.config.storage.api_prefix,
        &state.config.storage.base_dir,
        library_root.as_deref(),
        &FsProbe,
    )
    .ok_or_else(|| {
        warn!(resource = %resource.id, "no storage candidate exists for reference");
        GatewayError::NotFound
    })?;

    let resolved = ResolvedFile::stat(&path).await.ok_or(GatewayError::NotFound)?;
    if resolved.size == 0 {
        // A zero-length payload can never satisfy a byte range; treat the
        // asset as missing
        warn!(resource = %resource.id, path = %resolved.path.display(), "zero-length media file");
        return Err(GatewayError::NotFound);
    }

    let range_header = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());
    let range = parse_range(range_header, resolved.size)?;

    info!(
        caller = %caller.id,
        resource = %resource.id,
        size = resolved.size,
        ?range,
        "streaming media file"
    );

    Ok(serve_file(&resolved, range).await?)
}

fn require_param(value: Option<String>, name: &'static str) -> Result<String, GatewayError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(GatewayError::MissingParameter(name))
}
