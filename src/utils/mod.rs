//! Helpers shared across the application.
//!
//! - [`base62`] - Stateless reversible URL codec
//! - [`id_generator`] - Random short IDs, API keys and key digests

pub mod base62;
pub mod id_generator;
