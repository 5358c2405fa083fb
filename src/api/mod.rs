//! HTTP layer: request handling, DTOs and middleware.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Cookie authorization and request tracing
//! - [`routes`] - Route groups by required key

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
