//! Repository trait for vanity link data access.

use crate::domain::entities::VanityLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the vanity namespace.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VanityLinkRepository: Send + Sync {
    /// Stores a new vanity link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, link: VanityLink) -> Result<VanityLink, AppError>;

    /// Finds a vanity link by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<VanityLink>, AppError>;
}
