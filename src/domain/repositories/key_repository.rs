//! Repository trait for API key storage.

use crate::domain::entities::{ApiKey, NewApiKey};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for API key management.
///
/// Keys are looked up by their SHA-256 digest; the plaintext never reaches
/// this layer.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqlKeyRepository`] - SQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_keys.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyRepository: Send + Sync {
    /// Stores a new key record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a key with the same digest exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, key: NewApiKey) -> Result<ApiKey, AppError>;

    /// Finds a key by its hex digest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_digest(&self, digest: &str) -> Result<Option<ApiKey>, AppError>;

    /// Returns true if at least one key is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn has_any(&self) -> Result<bool, AppError>;

    /// Lists all keys, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<ApiKey>, AppError>;
}
