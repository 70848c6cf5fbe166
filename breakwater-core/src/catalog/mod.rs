//! Collaborator interfaces for the excluded subsystems.
//!
//! The gateway does not own identity, catalog, settings or commerce data.
//! It reaches them through the traits defined here; implementations are
//! expected to support many concurrent borrowers (a pooled store handle,
//! not a single shared connection). [`memory`] provides in-memory
//! implementations used by demo mode and tests.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::identity::{CallerIdentity, Role};

/// A single media item with its storage reference and ownership metadata.
///
/// Immutable for the duration of a request; owned and mutated by the
/// excluded catalog/upload subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResource {
    pub id: String,
    /// Absolute path, API-relative path, or opaque locator. References are
    /// historically inconsistent; the path resolver layers fallbacks over
    /// them.
    pub storage_reference: String,
    pub owner_id: String,
    pub owner_role: Role,
}

/// Global storage settings, read per request as an immutable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub library_root: Option<String>,
}

/// Kind of a commerce record. Only `Purchase` grants media access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseKind {
    Purchase,
    Other,
}

impl PurchaseKind {
    /// Decodes the raw kind string stored by the commerce subsystem.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("purchase") {
            PurchaseKind::Purchase
        } else {
            PurchaseKind::Other
        }
    }
}

/// A persisted fact that a caller bought access to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub buyer_id: String,
    pub resource_id: String,
    pub kind: PurchaseKind,
}

/// Errors surfaced by collaborator implementations.
///
/// The gateway maps these to 500; it never retries.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("store error: {0}")]
    Store(String),
}

/// Identity lookup by opaque session token.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Returns the identity holding `token`, or `None` when no row matches.
    ///
    /// # Errors
    ///
    /// - `CollaboratorError::Store` - The underlying store failed
    async fn lookup_by_token(
        &self,
        token: &str,
    ) -> Result<Option<CallerIdentity>, CollaboratorError>;
}

/// Resource lookup by id.
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Returns the resource with `id`, or `None` when unknown.
    ///
    /// # Errors
    ///
    /// - `CollaboratorError::Store` - The underlying store failed
    async fn resource_by_id(&self, id: &str)
    -> Result<Option<MediaResource>, CollaboratorError>;
}

/// Global settings snapshot provider.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the current settings snapshot. Refreshed out-of-band by the
    /// excluded configuration subsystem.
    ///
    /// # Errors
    ///
    /// - `CollaboratorError::Store` - The underlying store failed
    async fn global_settings(&self) -> Result<GlobalSettings, CollaboratorError>;
}

/// Purchase existence check against the commerce ledger.
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Returns the purchase records of kind "purchase" for
    /// (`buyer_id`, `resource_id`). The ledger is append-only.
    ///
    /// # Errors
    ///
    /// - `CollaboratorError::Store` - The underlying store failed
    async fn purchases_for(
        &self,
        buyer_id: &str,
        resource_id: &str,
    ) -> Result<Vec<PurchaseRecord>, CollaboratorError>;
}
