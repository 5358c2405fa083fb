//! Vanity link entity: a caller-chosen name mapped to a destination URL.

use serde::Serialize;

/// Upper bound on vanity name length (matches the `vanity_links.name` column).
pub const MAX_VANITY_NAME_LENGTH: usize = 255;

/// A caller-chosen name and its destination.
///
/// Names live in their own namespace; the same string may also exist as a
/// short-link id, in which case the short link wins during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VanityLink {
    pub name: String,
    pub url: String,
}

impl VanityLink {
    pub fn new(name: String, url: String) -> Self {
        Self { name, url }
    }
}
