//! Repository trait for short link data access.

use crate::domain::entities::ShortLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the short-link namespace.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqlShortLinkRepository`] - SQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_links.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Stores a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, link: ShortLink) -> Result<ShortLink, AppError>;

    /// Finds a short link by its id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<ShortLink>, AppError>;
}
