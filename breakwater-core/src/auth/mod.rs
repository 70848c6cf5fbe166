//! Authentication and authorization for media delivery.
//!
//! Splits the concern in two: [`identity`] exchanges opaque session tokens
//! for caller identities, [`access`] turns already-fetched identity,
//! resource and purchase data into an allow/deny verdict.

pub mod access;
pub mod identity;

pub use access::{AccessDecision, DenyReason, GrantReason, decide, metadata_grant};
pub use identity::{AuthError, CallerIdentity, Role, SessionValidator};
