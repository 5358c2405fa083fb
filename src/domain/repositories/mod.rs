//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented by the SQL
//! repositories in `crate::infrastructure::persistence`. Mock implementations
//! are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ShortLinkRepository`] - Short-link namespace
//! - [`VanityLinkRepository`] - Vanity namespace
//! - [`KeyRepository`] - API key storage
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod key_repository;
pub mod short_link_repository;
pub mod vanity_link_repository;

pub use key_repository::KeyRepository;
pub use short_link_repository::ShortLinkRepository;
pub use vanity_link_repository::VanityLinkRepository;

#[cfg(test)]
pub use key_repository::MockKeyRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
#[cfg(test)]
pub use vanity_link_repository::MockVanityLinkRepository;
