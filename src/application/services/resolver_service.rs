//! Token resolution across the short link and vanity namespaces.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::entities::{ShortLink, VanityLink};
use crate::domain::repositories::{ShortLinkRepository, VanityLinkRepository};
use crate::error::AppError;

/// Where a token was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Short(ShortLink),
    Vanity(VanityLink),
}

impl Resolution {
    pub fn url(&self) -> &str {
        match self {
            Resolution::Short(link) => &link.url,
            Resolution::Vanity(link) => &link.url,
        }
    }

    /// Which store answered.
    pub fn namespace(&self) -> &'static str {
        match self {
            Resolution::Short(_) => "short",
            Resolution::Vanity(_) => "vanity",
        }
    }
}

/// Resolves bare `/{token}` paths.
///
/// Short IDs take precedence. The vanity namespace is consulted only when the
/// short lookup reports not-found; any other failure is returned as is.
pub struct ResolverService<S: ShortLinkRepository, V: VanityLinkRepository> {
    links: Arc<LinkService<S, V>>,
}

impl<S: ShortLinkRepository, V: VanityLinkRepository> ResolverService<S, V> {
    pub fn new(links: Arc<LinkService<S, V>>) -> Self {
        Self { links }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if neither namespace knows `token`.
    pub async fn resolve(&self, token: &str) -> Result<Resolution, AppError> {
        match self.links.get_short_link(token).await {
            Ok(link) => return Ok(Resolution::Short(link)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let link = self.links.get_vanity_link(token).await?;
        Ok(Resolution::Vanity(link))
    }
}
