//! Gateway HTTP server.
//!
//! Wires the collaborator handles into an axum router with the `/video`
//! and `/health` endpoints and a CORS policy that lets browser players see
//! the range-related response headers.

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use breakwater_core::BreakwaterConfig;
use breakwater_core::auth::SessionValidator;
use breakwater_core::catalog::{IdentityStore, MediaCatalog, PurchaseLedger, SettingsStore};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::handlers::{health_check, stream_video};

/// Shared state for all request handlers.
///
/// Collaborator handles are `Arc<dyn Trait>`; implementations support many
/// concurrent borrowers, so no per-request locking happens here.
#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityStore>,
    pub catalog: Arc<dyn MediaCatalog>,
    pub settings: Arc<dyn SettingsStore>,
    pub purchases: Arc<dyn PurchaseLedger>,
    pub config: BreakwaterConfig,
}

impl AppState {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        catalog: Arc<dyn MediaCatalog>,
        settings: Arc<dyn SettingsStore>,
        purchases: Arc<dyn PurchaseLedger>,
        config: BreakwaterConfig,
    ) -> Self {
        Self {
            identities,
            catalog,
            settings,
            purchases,
            config,
        }
    }

    /// Session validator over the identity collaborator.
    pub fn session_validator(&self) -> SessionValidator {
        SessionValidator::new(self.identities.clone())
    }
}

/// Builds the gateway router. Exposed separately from [`run_server`] so
/// tests can drive it without binding a socket.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::RANGE,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_RANGE,
            header::ACCEPT_RANGES,
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/video", get(stream_video))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and serves until the process exits.
///
/// # Errors
///
/// - `std::io::Error` - Binding the listener or serving failed
pub async fn run_server(state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Breakwater media gateway listening on http://{addr}");
    axum::serve(listener, app).await
}
