//! Business logic services for the application layer.

pub mod key_service;
pub mod link_service;
pub mod resolver_service;

pub use key_service::{Access, KeyService};
pub use link_service::LinkService;
pub use resolver_service::{Resolution, ResolverService};
