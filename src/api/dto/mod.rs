//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies are checked with `validator` before they reach a service.

pub mod health;
pub mod key;
pub mod link;
