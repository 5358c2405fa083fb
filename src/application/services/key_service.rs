//! API key issuance and verification.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{ApiKey, IssuedKey, NewApiKey};
use crate::domain::repositories::KeyRepository;
use crate::error::AppError;
use crate::utils::id_generator::{generate_key, hash_key};

/// Privilege an endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any stored key.
    LinkCreator,
    /// A key with `admin = true`.
    Admin,
}

/// Service for API keys.
///
/// Keys are random 16-character strings. Only their SHA-256 digest is stored,
/// so a plaintext key is visible exactly once: in the [`IssuedKey`] returned
/// at creation.
pub struct KeyService<R: KeyRepository> {
    repository: Arc<R>,
}

impl<R: KeyRepository> KeyService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Issues a new key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_key(&self, admin: Option<bool>) -> Result<IssuedKey, AppError> {
        let plaintext = generate_key();

        let record = self
            .repository
            .create(NewApiKey {
                hashed: hash_key(&plaintext),
                admin,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(hashed = %record.hashed, admin = record.is_admin(), "API key created");

        Ok(IssuedKey { plaintext, record })
    }

    /// Looks up a key record by its hex digest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no key has this digest.
    pub async fn find_key_by_digest(&self, digest: &str) -> Result<ApiKey, AppError> {
        self.repository
            .find_by_digest(digest)
            .await?
            .ok_or_else(|| AppError::not_found("API key not found", json!({ "hashed": digest })))
    }

    /// Resolves a plaintext key to its record.
    ///
    /// `Ok(None)` means the key is unknown. Store failures are errors, never
    /// a silent "unauthorized".
    pub async fn verify_key(&self, plaintext: &str) -> Result<Option<ApiKey>, AppError> {
        if plaintext.is_empty() {
            return Ok(None);
        }

        self.repository.find_by_digest(&hash_key(plaintext)).await
    }

    /// Checks that a presented key grants `access`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the key is missing or unknown.
    /// Returns [`AppError::Forbidden`] if a valid key lacks admin rights for
    /// [`Access::Admin`].
    pub async fn authorize(&self, plaintext: Option<&str>, access: Access) -> Result<ApiKey, AppError> {
        let Some(plaintext) = plaintext else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Missing access token" }),
            ));
        };

        let key = self.verify_key(plaintext).await?.ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid access token" }))
        })?;

        if access == Access::Admin && !key.is_admin() {
            return Err(AppError::forbidden(
                "Admin key required",
                json!({ "hashed": key.hashed }),
            ));
        }

        Ok(key)
    }

    pub async fn has_any_key(&self) -> Result<bool, AppError> {
        self.repository.has_any().await
    }

    pub async fn list_keys(&self) -> Result<Vec<ApiKey>, AppError> {
        self.repository.list().await
    }

    /// Creates an admin key when the store holds no keys at all.
    ///
    /// Returns `None` when keys already exist. Two instances starting against
    /// an empty store may both issue one.
    pub async fn bootstrap_admin_key(&self) -> Result<Option<IssuedKey>, AppError> {
        if self.has_any_key().await? {
            return Ok(None);
        }

        self.create_key(Some(true)).await.map(Some)
    }
}
