//! Caller identity and session token validation.
//!
//! Upstream identity data is loosely typed: role strings arrive with
//! inconsistent casing and stray whitespace. Normalization happens exactly
//! once, here at the lookup boundary, so the rest of the gateway compares
//! a closed [`Role`] enum instead of strings.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CollaboratorError, IdentityStore};

/// Caller role decoded from the identity collaborator.
///
/// Anything that is not the admin marker decodes to `User`, including
/// absent or empty role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Decodes a raw role string, trimming whitespace and folding case.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// Identity of a caller holding a valid session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub id: String,
    pub role: Role,
    /// Subscription expiry as epoch seconds; `None` means no subscription.
    pub subscription_expiry: Option<i64>,
}

impl CallerIdentity {
    /// True when the subscription is present and expires strictly after
    /// `now_epoch`.
    pub fn has_active_subscription(&self, now_epoch: i64) -> bool {
        self.subscription_expiry
            .is_some_and(|expiry| expiry > now_epoch)
    }
}

/// Errors from session validation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No identity matches the presented token. Expired and never-existed
    /// tokens are indistinguishable to callers.
    #[error("invalid session token")]
    InvalidSession,

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Exchanges opaque session tokens for caller identities.
///
/// Performs exactly one lookup per validation against the injected
/// identity collaborator, keyed on an exact token match.
#[derive(Clone)]
pub struct SessionValidator {
    identities: Arc<dyn IdentityStore>,
}

impl SessionValidator {
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Validates a session token.
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidSession` - No identity matches the token
    /// - `AuthError::Collaborator` - The identity store itself failed
    pub async fn validate(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        self.identities
            .lookup_by_token(token)
            .await?
            .ok_or(AuthError::InvalidSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::InMemoryIdentityStore;

    #[test]
    fn test_role_decoding_normalizes_case_and_whitespace() {
        assert_eq!(Role::from_raw("admin"), Role::Admin);
        assert_eq!(Role::from_raw("ADMIN"), Role::Admin);
        assert_eq!(Role::from_raw(" Admin "), Role::Admin);
        assert_eq!(Role::from_raw("user"), Role::User);
        assert_eq!(Role::from_raw("administrator"), Role::User);
        assert_eq!(Role::from_raw(""), Role::User);
    }

    #[test]
    fn test_subscription_activity() {
        let caller = CallerIdentity {
            id: "c1".to_string(),
            role: Role::User,
            subscription_expiry: Some(1_000),
        };

        assert!(caller.has_active_subscription(999));
        assert!(!caller.has_active_subscription(1_000)); // strictly greater
        assert!(!caller.has_active_subscription(1_001));

        let no_sub = CallerIdentity {
            subscription_expiry: None,
            ..caller
        };
        assert!(!no_sub.has_active_subscription(0));
    }

    #[tokio::test]
    async fn test_validate_known_and_unknown_tokens() {
        let store = Arc::new(InMemoryIdentityStore::new());
        store.insert(
            "tok-1",
            CallerIdentity {
                id: "c1".to_string(),
                role: Role::User,
                subscription_expiry: None,
            },
        );

        let validator = SessionValidator::new(store);

        let caller = validator.validate("tok-1").await.unwrap();
        assert_eq!(caller.id, "c1");

        let err = validator.validate("tok-2").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }
}
