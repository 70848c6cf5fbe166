//! Shared harness for gateway integration tests.

use std::io::Write;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use breakwater_core::BreakwaterConfig;
use breakwater_core::auth::{CallerIdentity, Role};
use breakwater_core::catalog::MediaResource;
use breakwater_core::catalog::memory::{
    InMemoryCatalog, InMemoryIdentityStore, InMemoryPurchaseLedger, InMemorySettings,
};
use breakwater_web::{AppState, build_router};
use tempfile::TempDir;
use tower::ServiceExt;

/// A gateway wired to in-memory collaborators and a temp media directory.
pub struct TestGateway {
    pub router: Router,
    pub media_dir: TempDir,
    pub identities: Arc<InMemoryIdentityStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub settings: Arc<InMemorySettings>,
    pub purchases: Arc<InMemoryPurchaseLedger>,
}

impl TestGateway {
    pub fn new() -> Self {
        let media_dir = tempfile::tempdir().expect("create media dir");

        let identities = Arc::new(InMemoryIdentityStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let settings = Arc::new(InMemorySettings::new());
        let purchases = Arc::new(InMemoryPurchaseLedger::new());

        let mut config = BreakwaterConfig::default();
        config.storage.base_dir = media_dir.path().to_path_buf();

        let state = AppState::new(
            identities.clone(),
            catalog.clone(),
            settings.clone(),
            purchases.clone(),
            config,
        );

        Self {
            router: build_router(state),
            media_dir,
            identities,
            catalog,
            settings,
            purchases,
        }
    }

    /// Registers a caller and returns their session token.
    pub fn add_caller(&self, id: &str, role: Role, subscription_expiry: Option<i64>) -> String {
        let token = format!("token-{id}");
        self.identities.insert(
            &token,
            CallerIdentity {
                id: id.to_string(),
                role,
                subscription_expiry,
            },
        );
        token
    }

    /// Writes a media file under the base directory and registers a
    /// resource whose API-relative reference resolves to it.
    pub fn add_resource(&self, id: &str, owner_id: &str, owner_role: Role, bytes: &[u8]) {
        let file_name = format!("{id}.mp4");
        let mut file =
            std::fs::File::create(self.media_dir.path().join(&file_name)).expect("create media");
        file.write_all(bytes).expect("write media");

        self.catalog.insert(MediaResource {
            id: id.to_string(),
            storage_reference: format!("/api/media/{file_name}"),
            owner_id: owner_id.to_string(),
            owner_role,
        });
    }

    /// Registers a resource whose reference points nowhere on disk.
    pub fn add_dangling_resource(&self, id: &str, owner_id: &str) {
        self.catalog.insert(MediaResource {
            id: id.to_string(),
            storage_reference: format!("/api/media/{id}-missing.mp4"),
            owner_id: owner_id.to_string(),
            owner_role: Role::User,
        });
    }

    /// Issues a GET against the router, with an optional Range header.
    pub async fn get(&self, uri: &str, range: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(range) = range {
            builder = builder.header("Range", range);
        }

        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).expect("build request"))
            .await
            .expect("infallible router call")
    }
}

/// Collects a response body, panicking past `limit` bytes.
pub async fn body_bytes(response: Response<Body>, limit: usize) -> bytes::Bytes {
    axum::body::to_bytes(response.into_body(), limit)
        .await
        .expect("collect body")
}

/// An epoch timestamp comfortably in the future.
pub fn future_epoch() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

/// An epoch timestamp comfortably in the past.
pub fn past_epoch() -> i64 {
    chrono::Utc::now().timestamp() - 3600
}
