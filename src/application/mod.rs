//! Application layer services implementing business logic.
//!
//! Services consume the repository traits and give HTTP handlers and the
//! admin CLI one API over storage, validation and ID allocation.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short and vanity link creation and lookup
//! - [`services::key_service::KeyService`] - API key issuance and authorization
//! - [`services::resolver_service::ResolverService`] - Short-then-vanity token resolution

pub mod services;
