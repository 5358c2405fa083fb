//! HTTP middleware for request processing and protection.
//!
//! Provides cookie authorization and request tracing.

pub mod auth;
pub mod tracing;
