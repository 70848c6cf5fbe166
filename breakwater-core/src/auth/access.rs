//! Access decision engine.
//!
//! A pure decision function over already-fetched caller, resource and
//! purchase data. Checks are ordered so that everything answerable from
//! metadata alone runs before anything that would need a purchase-ledger
//! query; [`metadata_grant`] exposes that prefix so the request handler can
//! skip the ledger entirely when an earlier rule grants.

use serde::Serialize;

use crate::auth::identity::{CallerIdentity, Role};
use crate::catalog::{MediaResource, PurchaseKind, PurchaseRecord};

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted(GrantReason),
    Denied(DenyReason),
}

/// Which rule granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrantReason {
    Admin,
    Owner,
    Subscription,
    Purchase,
}

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DenyReason {
    PaymentRequired,
}

impl DenyReason {
    pub fn message(self) -> &'static str {
        match self {
            DenyReason::PaymentRequired => "payment required",
        }
    }
}

/// Evaluates the metadata-only rules: admin override, ownership, and
/// subscription pass-through on subscription-tier content.
///
/// Subscription-tier content is content whose owner carries the admin
/// marker; an active subscription (expiry strictly after `now_epoch`)
/// unlocks it.
pub fn metadata_grant(
    caller: &CallerIdentity,
    resource: &MediaResource,
    now_epoch: i64,
) -> Option<GrantReason> {
    if caller.role == Role::Admin {
        return Some(GrantReason::Admin);
    }

    if caller.id == resource.owner_id {
        return Some(GrantReason::Owner);
    }

    if caller.has_active_subscription(now_epoch) && resource.owner_role == Role::Admin {
        return Some(GrantReason::Subscription);
    }

    None
}

/// Computes the full allow/deny verdict. First match wins.
///
/// `purchases` holds the already-fetched purchase records for this caller
/// and resource; only records of kind `Purchase` grant access.
pub fn decide(
    caller: &CallerIdentity,
    resource: &MediaResource,
    purchases: &[PurchaseRecord],
    now_epoch: i64,
) -> AccessDecision {
    if let Some(reason) = metadata_grant(caller, resource, now_epoch) {
        return AccessDecision::Granted(reason);
    }

    let purchased = purchases.iter().any(|record| {
        record.kind == PurchaseKind::Purchase
            && record.buyer_id == caller.id
            && record.resource_id == resource.id
    });
    if purchased {
        return AccessDecision::Granted(GrantReason::Purchase);
    }

    AccessDecision::Denied(DenyReason::PaymentRequired)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn caller(id: &str, role: Role, expiry: Option<i64>) -> CallerIdentity {
        CallerIdentity {
            id: id.to_string(),
            role,
            subscription_expiry: expiry,
        }
    }

    fn resource(id: &str, owner_id: &str, owner_role: Role) -> MediaResource {
        MediaResource {
            id: id.to_string(),
            storage_reference: format!("/api/media/{id}.mp4"),
            owner_id: owner_id.to_string(),
            owner_role,
        }
    }

    fn purchase(buyer: &str, resource: &str) -> PurchaseRecord {
        PurchaseRecord {
            buyer_id: buyer.to_string(),
            resource_id: resource.to_string(),
            kind: PurchaseKind::Purchase,
        }
    }

    #[test]
    fn test_admin_granted_regardless_of_other_state() {
        let admin = caller("c1", Role::Admin, None);
        let res = resource("v1", "someone-else", Role::User);

        assert_eq!(
            decide(&admin, &res, &[], NOW),
            AccessDecision::Granted(GrantReason::Admin)
        );
    }

    #[test]
    fn test_owner_granted_without_role_or_subscription() {
        let owner = caller("c1", Role::User, None);
        let res = resource("v1", "c1", Role::User);

        assert_eq!(
            decide(&owner, &res, &[], NOW),
            AccessDecision::Granted(GrantReason::Owner)
        );
    }

    #[test]
    fn test_active_subscription_unlocks_admin_owned_content() {
        let subscriber = caller("c1", Role::User, Some(NOW + 60));
        let premium = resource("v1", "c2", Role::Admin);

        assert_eq!(
            decide(&subscriber, &premium, &[], NOW),
            AccessDecision::Granted(GrantReason::Subscription)
        );
    }

    #[test]
    fn test_subscription_does_not_unlock_user_owned_content() {
        let subscriber = caller("c1", Role::User, Some(NOW + 60));
        let res = resource("v1", "c2", Role::User);

        assert_eq!(
            decide(&subscriber, &res, &[], NOW),
            AccessDecision::Denied(DenyReason::PaymentRequired)
        );
    }

    #[test]
    fn test_expired_or_missing_subscription_denied() {
        let premium = resource("v1", "c2", Role::Admin);

        let expired = caller("c1", Role::User, Some(NOW - 1));
        assert_eq!(
            decide(&expired, &premium, &[], NOW),
            AccessDecision::Denied(DenyReason::PaymentRequired)
        );

        // Expiry equal to now is not strictly greater, so it does not grant
        let boundary = caller("c1", Role::User, Some(NOW));
        assert_eq!(
            decide(&boundary, &premium, &[], NOW),
            AccessDecision::Denied(DenyReason::PaymentRequired)
        );

        let none = caller("c1", Role::User, None);
        assert_eq!(
            decide(&none, &premium, &[], NOW),
            AccessDecision::Denied(DenyReason::PaymentRequired)
        );
    }

    #[test]
    fn test_purchase_grants_without_other_qualification() {
        let buyer = caller("c1", Role::User, None);
        let res = resource("v1", "c2", Role::User);

        assert_eq!(
            decide(&buyer, &res, &[purchase("c1", "v1")], NOW),
            AccessDecision::Granted(GrantReason::Purchase)
        );
    }

    #[test]
    fn test_purchase_for_other_resource_or_buyer_denied() {
        let buyer = caller("c1", Role::User, None);
        let res = resource("v1", "c2", Role::User);

        assert_eq!(
            decide(&buyer, &res, &[purchase("c1", "v2")], NOW),
            AccessDecision::Denied(DenyReason::PaymentRequired)
        );
        assert_eq!(
            decide(&buyer, &res, &[purchase("c9", "v1")], NOW),
            AccessDecision::Denied(DenyReason::PaymentRequired)
        );
    }

    #[test]
    fn test_non_purchase_kind_does_not_grant() {
        let buyer = caller("c1", Role::User, None);
        let res = resource("v1", "c2", Role::User);
        let rental = PurchaseRecord {
            buyer_id: "c1".to_string(),
            resource_id: "v1".to_string(),
            kind: PurchaseKind::Other,
        };

        assert_eq!(
            decide(&buyer, &res, &[rental], NOW),
            AccessDecision::Denied(DenyReason::PaymentRequired)
        );
    }

    #[test]
    fn test_metadata_grant_skips_purchase_rule() {
        let unqualified = caller("c1", Role::User, None);
        let res = resource("v1", "c2", Role::User);
        assert_eq!(metadata_grant(&unqualified, &res, NOW), None);

        let owner = caller("c2", Role::User, None);
        assert_eq!(
            metadata_grant(&owner, &res, NOW),
            Some(GrantReason::Owner)
        );
    }
}
