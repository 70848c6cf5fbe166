//! Breakwater Core - paywalled media delivery essentials
//!
//! This crate provides the fundamental building blocks for the media
//! gateway: session validation, the access decision engine, storage path
//! resolution, and the range-aware file streaming engine. Persistence,
//! catalogs and commerce live behind the collaborator traits in [`catalog`].

pub mod auth;
pub mod catalog;
pub mod config;
pub mod storage;
pub mod streaming;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use auth::{AccessDecision, AuthError, CallerIdentity, Role, SessionValidator};
pub use catalog::{CollaboratorError, GlobalSettings, MediaResource, PurchaseRecord};
pub use config::BreakwaterConfig;
pub use storage::ResolvedFile;
pub use streaming::RangeError;

/// Core errors that can bubble up from any Breakwater subsystem.
#[derive(Debug, thiserror::Error)]
pub enum BreakwaterError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BreakwaterError {
    /// Returns a user-friendly error message suitable for display.
    ///
    /// Internal detail (paths, store faults) stays out of the returned
    /// string; callers log the full chain server-side.
    pub fn user_message(&self) -> String {
        match self {
            BreakwaterError::Auth(AuthError::InvalidSession) => {
                "Invalid or expired session".to_string()
            }
            BreakwaterError::Auth(_) => "Authentication error occurred".to_string(),
            BreakwaterError::Collaborator(_) => "Upstream lookup failed".to_string(),
            BreakwaterError::Range(e) => e.to_string(),
            BreakwaterError::Configuration { reason } => {
                format!("Configuration error: {reason}")
            }
            BreakwaterError::Io(_) => "File system error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BreakwaterError>;
