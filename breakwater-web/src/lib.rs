//! Breakwater Web - HTTP gateway server
//!
//! Serves paywalled media over HTTP with byte-range support. The server
//! orchestrates session validation, the access decision engine, path
//! resolution and range delivery from `breakwater-core`, and maps every
//! failure to a precise status code.

pub mod error;
pub mod handlers;
pub mod server;

// Re-export main types
pub use error::GatewayError;
pub use server::{AppState, build_router, run_server};
