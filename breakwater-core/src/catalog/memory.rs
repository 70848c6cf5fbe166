//! In-memory collaborator implementations.
//!
//! Back the gateway with plain maps for demo mode and tests. Reads take a
//! shared lock, so many requests can borrow a store concurrently.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{
    CollaboratorError, GlobalSettings, IdentityStore, MediaCatalog, MediaResource,
    PurchaseKind, PurchaseLedger, PurchaseRecord, SettingsStore,
};
use crate::auth::identity::CallerIdentity;

/// Token → identity map.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    identities: RwLock<HashMap<String, CallerIdentity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: &str, identity: CallerIdentity) {
        self.identities
            .write()
            .insert(token.to_string(), identity);
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn lookup_by_token(
        &self,
        token: &str,
    ) -> Result<Option<CallerIdentity>, CollaboratorError> {
        Ok(self.identities.read().get(token).cloned())
    }
}

/// Id → resource map.
#[derive(Default)]
pub struct InMemoryCatalog {
    resources: RwLock<HashMap<String, MediaResource>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, resource: MediaResource) {
        self.resources
            .write()
            .insert(resource.id.clone(), resource);
    }
}

#[async_trait]
impl MediaCatalog for InMemoryCatalog {
    async fn resource_by_id(
        &self,
        id: &str,
    ) -> Result<Option<MediaResource>, CollaboratorError> {
        Ok(self.resources.read().get(id).cloned())
    }
}

/// Single settings snapshot, replaceable out-of-band.
#[derive(Default)]
pub struct InMemorySettings {
    settings: RwLock<GlobalSettings>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library_root(root: impl Into<String>) -> Self {
        Self {
            settings: RwLock::new(GlobalSettings {
                library_root: Some(root.into()),
            }),
        }
    }

    pub fn replace(&self, settings: GlobalSettings) {
        *self.settings.write() = settings;
    }
}

#[async_trait]
impl SettingsStore for InMemorySettings {
    async fn global_settings(&self) -> Result<GlobalSettings, CollaboratorError> {
        Ok(self.settings.read().clone())
    }
}

/// Append-only purchase ledger.
#[derive(Default)]
pub struct InMemoryPurchaseLedger {
    records: RwLock<Vec<PurchaseRecord>>,
}

impl InMemoryPurchaseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_purchase(&self, buyer_id: &str, resource_id: &str) {
        self.records.write().push(PurchaseRecord {
            buyer_id: buyer_id.to_string(),
            resource_id: resource_id.to_string(),
            kind: PurchaseKind::Purchase,
        });
    }
}

#[async_trait]
impl PurchaseLedger for InMemoryPurchaseLedger {
    async fn purchases_for(
        &self,
        buyer_id: &str,
        resource_id: &str,
    ) -> Result<Vec<PurchaseRecord>, CollaboratorError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|record| {
                record.kind == PurchaseKind::Purchase
                    && record.buyer_id == buyer_id
                    && record.resource_id == resource_id
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::Role;

    #[tokio::test]
    async fn test_identity_store_exact_token_match() {
        let store = InMemoryIdentityStore::new();
        store.insert(
            "tok",
            CallerIdentity {
                id: "c1".to_string(),
                role: Role::User,
                subscription_expiry: None,
            },
        );

        assert!(store.lookup_by_token("tok").await.unwrap().is_some());
        assert!(store.lookup_by_token("TOK").await.unwrap().is_none());
        assert!(store.lookup_by_token("tok ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ledger_filters_by_buyer_and_resource() {
        let ledger = InMemoryPurchaseLedger::new();
        ledger.record_purchase("c1", "v1");
        ledger.record_purchase("c1", "v2");
        ledger.record_purchase("c2", "v1");

        let records = ledger.purchases_for("c1", "v1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].buyer_id, "c1");
        assert_eq!(records[0].resource_id, "v1");

        assert!(ledger.purchases_for("c3", "v1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_snapshot_replace() {
        let settings = InMemorySettings::new();
        assert_eq!(
            settings.global_settings().await.unwrap().library_root,
            None
        );

        settings.replace(GlobalSettings {
            library_root: Some("/mnt/library".to_string()),
        });
        assert_eq!(
            settings.global_settings().await.unwrap().library_root,
            Some("/mnt/library".to_string())
        );
    }

    #[test]
    fn test_purchase_kind_decoding() {
        assert_eq!(PurchaseKind::from_raw("purchase"), PurchaseKind::Purchase);
        assert_eq!(PurchaseKind::from_raw(" PURCHASE "), PurchaseKind::Purchase);
        assert_eq!(PurchaseKind::from_raw("rental"), PurchaseKind::Other);
    }
}
