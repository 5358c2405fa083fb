//! DTOs for API key administration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ApiKey, IssuedKey};

/// Request to issue a new key.
#[derive(Debug, Default, Deserialize)]
pub struct CreateKeyRequest {
    /// Grants admin rights when `true`. Omitted means a plain link-creator key.
    #[serde(default)]
    pub admin: Option<bool>,
}

/// A stored key record. Never contains the plaintext.
#[derive(Debug, Serialize)]
pub struct KeyResponse {
    pub hashed: String,
    pub admin: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKey> for KeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            hashed: key.hashed,
            admin: key.admin,
            created_at: key.created_at,
        }
    }
}

/// All stored keys, newest first.
#[derive(Debug, Serialize)]
pub struct KeyListResponse {
    pub total: usize,
    pub items: Vec<KeyResponse>,
}

impl From<Vec<ApiKey>> for KeyListResponse {
    fn from(keys: Vec<ApiKey>) -> Self {
        Self {
            total: keys.len(),
            items: keys.into_iter().map(KeyResponse::from).collect(),
        }
    }
}

/// A newly issued key. `key` is the only time the plaintext is returned.
#[derive(Debug, Serialize)]
pub struct IssuedKeyResponse {
    pub key: String,
    pub hashed: String,
    pub admin: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl From<IssuedKey> for IssuedKeyResponse {
    fn from(issued: IssuedKey) -> Self {
        Self {
            key: issued.plaintext,
            hashed: issued.record.hashed,
            admin: issued.record.admin,
            created_at: issued.record.created_at,
        }
    }
}
