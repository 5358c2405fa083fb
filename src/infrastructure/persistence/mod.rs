//! SQL repository implementations.
//!
//! Concrete implementations of the domain repository traits on top of
//! [`crate::infrastructure::database::Database`], which works against
//! Postgres, MySQL-family servers and SQLite.
//!
//! # Repositories
//!
//! - [`SqlShortLinkRepository`] - Short link storage and lookup
//! - [`SqlVanityLinkRepository`] - Vanity link storage and lookup
//! - [`SqlKeyRepository`] - API key storage and digest lookup

pub mod sql_key_repository;
pub mod sql_short_link_repository;
pub mod sql_vanity_link_repository;

pub use sql_key_repository::SqlKeyRepository;
pub use sql_short_link_repository::SqlShortLinkRepository;
pub use sql_vanity_link_repository::SqlVanityLinkRepository;
