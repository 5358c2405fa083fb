//! Random identifiers and key digests.
//!
//! Short IDs and API keys are drawn from the thread-local CSPRNG over
//! `[A-Za-z0-9]`. Keys are only ever stored as SHA-256 hex digests.

use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::{Digest, Sha256};

use crate::domain::entities::{KEY_LENGTH, SHORT_ID_LENGTH};

/// Generates a random 8-character short link ID.
pub fn generate_short_id() -> String {
    random_alphanumeric(SHORT_ID_LENGTH)
}

/// Generates a random 16-character plaintext API key.
pub fn generate_key() -> String {
    random_alphanumeric(KEY_LENGTH)
}

/// Hashes a plaintext key into the 64-character lowercase hex digest that is
/// persisted and used as the key's handle.
pub fn hash_key(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
