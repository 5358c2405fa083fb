//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`database`] - Backend selection, connection pool and schema migrations
//! - [`persistence`] - SQL repository implementations

pub mod database;
pub mod persistence;
