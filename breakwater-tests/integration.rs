//! Integration tests for Breakwater
//!
//! These tests drive the real gateway router end to end: in-memory
//! collaborators, temp-file-backed media, and full HTTP semantics through
//! `tower::ServiceExt::oneshot` without binding a socket.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/gateway_flow.rs"]
mod gateway_flow;

#[path = "integration/range_requests.rs"]
mod range_requests;

#[path = "integration/health.rs"]
mod health;
