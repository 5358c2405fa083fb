//! Short link entity: a generated identifier mapped to a destination URL.

use serde::Serialize;

/// Length of generated short-link identifiers.
pub const SHORT_ID_LENGTH: usize = 8;

/// A system-generated short identifier and its destination.
///
/// The `id` is unique within the short-link namespace and never changes once
/// the link is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub id: String,
    pub url: String,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: String, url: String) -> Self {
        Self { id, url }
    }
}
