//! API key entity.

use chrono::{DateTime, Utc};

/// Number of characters in an issued key.
pub const KEY_LENGTH: usize = 16;

/// Stored API key record.
///
/// Only the SHA-256 digest of the key is kept; the plaintext is handed to the
/// caller once at creation time (see [`IssuedKey`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    /// Lowercase hex SHA-256 digest of the plaintext key.
    pub hashed: String,
    /// `Some(true)` grants administrative access; `None` and `Some(false)` do not.
    pub admin: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    pub fn new(hashed: String, admin: Option<bool>, created_at: DateTime<Utc>) -> Self {
        Self {
            hashed,
            admin,
            created_at,
        }
    }

    /// Returns true if the key may perform administrative operations.
    pub fn is_admin(&self) -> bool {
        self.admin.unwrap_or(false)
    }
}

/// Input data for storing a new key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiKey {
    pub hashed: String,
    pub admin: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// A freshly created key together with its plaintext.
///
/// The plaintext cannot be recovered later; callers must show or transmit it
/// immediately.
#[derive(Debug, Clone)]
pub struct IssuedKey {
    pub plaintext: String,
    pub record: ApiKey,
}
