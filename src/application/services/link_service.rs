//! Short link and vanity link creation and retrieval.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{MAX_VANITY_NAME_LENGTH, ShortLink, VanityLink};
use crate::domain::repositories::{ShortLinkRepository, VanityLinkRepository};
use crate::error::AppError;
use crate::utils::id_generator::generate_short_id;

/// Candidate IDs tried per short link before giving up.
pub const MAX_ID_ATTEMPTS: usize = 16;

/// Produces candidate short link IDs.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Service for the two link namespaces.
///
/// Short links get random IDs with collision retry. Vanity links use the
/// caller's name verbatim and never overwrite an existing entry.
pub struct LinkService<S: ShortLinkRepository, V: VanityLinkRepository> {
    short_links: Arc<S>,
    vanity_links: Arc<V>,
    generate_id: IdGenerator,
}

impl<S: ShortLinkRepository, V: VanityLinkRepository> LinkService<S, V> {
    /// Creates a new link service using random 8-character IDs.
    pub fn new(short_links: Arc<S>, vanity_links: Arc<V>) -> Self {
        Self {
            short_links,
            vanity_links,
            generate_id: Arc::new(generate_short_id),
        }
    }

    /// Replaces the ID source, e.g. to force collisions in tests.
    pub fn with_id_generator(mut self, generate_id: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.generate_id = Arc::new(generate_id);
        self
    }

    /// Stores `url` under a fresh random ID.
    ///
    /// A candidate is skipped when a read finds it taken, and retried when
    /// the insert loses a race to a concurrent writer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ResourceExhausted`] after [`MAX_ID_ATTEMPTS`]
    /// colliding candidates.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_short_link(&self, url: String) -> Result<ShortLink, AppError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = (self.generate_id)();

            if self.short_links.find_by_id(&id).await?.is_some() {
                tracing::debug!(%id, attempt, "Short link ID already taken");
                continue;
            }

            match self.short_links.create(ShortLink::new(id, url.clone())).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "Short link ID claimed concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(attempts = MAX_ID_ATTEMPTS, "Could not allocate a short link ID");

        Err(AppError::resource_exhausted(
            "Failed to allocate a short link ID",
            json!({ "attempts": MAX_ID_ATTEMPTS }),
        ))
    }

    /// Stores `url` under a caller-chosen name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is empty, too long or
    /// contains `/`.
    /// Returns [`AppError::Conflict`] if the name is already taken.
    pub async fn create_vanity_link(&self, name: String, url: String) -> Result<VanityLink, AppError> {
        validate_vanity_name(&name)?;

        match self.vanity_links.create(VanityLink::new(name.clone(), url)).await {
            Err(AppError::Conflict { .. }) => Err(AppError::conflict(
                "Vanity name already taken",
                json!({ "name": name }),
            )),
            other => other,
        }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no short link has this ID.
    pub async fn get_short_link(&self, id: &str) -> Result<ShortLink, AppError> {
        self.short_links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no vanity link has this name.
    pub async fn get_vanity_link(&self, name: &str) -> Result<VanityLink, AppError> {
        self.vanity_links
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found("Vanity link not found", json!({ "name": name })))
    }
}

/// Checks that a vanity name can be used as a single path segment.
pub fn validate_vanity_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::bad_request(
            "Vanity name must not be empty",
            json!({}),
        ));
    }

    let len = name.chars().count();
    if len > MAX_VANITY_NAME_LENGTH {
        return Err(AppError::bad_request(
            "Vanity name is too long",
            json!({ "length": len, "max": MAX_VANITY_NAME_LENGTH }),
        ));
    }

    if name.contains('/') {
        return Err(AppError::bad_request(
            "Vanity name must not contain '/'",
            json!({ "name": name }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockShortLinkRepository, MockVanityLinkRepository};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sequence(ids: &'static [&'static str]) -> impl Fn() -> String + Send + Sync + 'static {
        let next = AtomicUsize::new(0);
        move || ids[next.fetch_add(1, Ordering::SeqCst) % ids.len()].to_string()
    }

    fn service(
        short: MockShortLinkRepository,
        vanity: MockVanityLinkRepository,
    ) -> LinkService<MockShortLinkRepository, MockVanityLinkRepository> {
        LinkService::new(Arc::new(short), Arc::new(vanity))
    }

    #[tokio::test]
    async fn test_create_short_link_success() {
        let mut short = MockShortLinkRepository::new();

        short.expect_find_by_id().times(1).returning(|_| Ok(None));
        short
            .expect_create()
            .withf(|link| link.id.len() == 8 && link.url == "https://example.com")
            .times(1)
            .returning(Ok);

        let link = service(short, MockVanityLinkRepository::new())
            .create_short_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.url, "https://example.com");
        assert!(link.id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_create_short_link_skips_taken_id() {
        let mut short = MockShortLinkRepository::new();

        short
            .expect_find_by_id()
            .withf(|id| id == "taken001")
            .times(1)
            .returning(|id| Ok(Some(ShortLink::new(id.to_string(), "https://other.org".to_string()))));
        short
            .expect_find_by_id()
            .withf(|id| id == "fresh002")
            .times(1)
            .returning(|_| Ok(None));
        short
            .expect_create()
            .withf(|link| link.id == "fresh002")
            .times(1)
            .returning(Ok);

        let link = service(short, MockVanityLinkRepository::new())
            .with_id_generator(sequence(&["taken001", "fresh002"]))
            .create_short_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.id, "fresh002");
        assert_eq!(link.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_short_link_retries_on_insert_conflict() {
        let mut short = MockShortLinkRepository::new();

        short.expect_find_by_id().times(2).returning(|_| Ok(None));
        short
            .expect_create()
            .withf(|link| link.id == "raced001")
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));
        short
            .expect_create()
            .withf(|link| link.id == "fresh002")
            .times(1)
            .returning(Ok);

        let link = service(short, MockVanityLinkRepository::new())
            .with_id_generator(sequence(&["raced001", "fresh002"]))
            .create_short_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.id, "fresh002");
    }

    #[tokio::test]
    async fn test_create_short_link_exhausted() {
        let mut short = MockShortLinkRepository::new();

        short
            .expect_find_by_id()
            .times(MAX_ID_ATTEMPTS)
            .returning(|id| Ok(Some(ShortLink::new(id.to_string(), "https://other.org".to_string()))));
        short.expect_create().never();

        let result = service(short, MockVanityLinkRepository::new())
            .with_id_generator(|| "always00".to_string())
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(matches!(result, Err(AppError::ResourceExhausted { .. })));
    }

    #[tokio::test]
    async fn test_create_short_link_propagates_store_error() {
        let mut short = MockShortLinkRepository::new();

        short
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(short, MockVanityLinkRepository::new())
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_vanity_link_success() {
        let mut vanity = MockVanityLinkRepository::new();

        vanity
            .expect_create()
            .withf(|link| link.name == "docs" && link.url == "https://docs.rs")
            .times(1)
            .returning(Ok);

        let link = service(MockShortLinkRepository::new(), vanity)
            .create_vanity_link("docs".to_string(), "https://docs.rs".to_string())
            .await
            .unwrap();

        assert_eq!(link.name, "docs");
    }

    #[tokio::test]
    async fn test_create_vanity_link_duplicate() {
        let mut vanity = MockVanityLinkRepository::new();

        vanity
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let err = service(MockShortLinkRepository::new(), vanity)
            .create_vanity_link("docs".to_string(), "https://docs.rs".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Vanity name already taken");
    }

    #[tokio::test]
    async fn test_create_vanity_link_rejects_bad_names() {
        let svc = service(MockShortLinkRepository::new(), MockVanityLinkRepository::new());

        for name in [String::new(), "a/b".to_string(), "x".repeat(256)] {
            let result = svc
                .create_vanity_link(name, "https://docs.rs".to_string())
                .await;
            assert!(matches!(result, Err(AppError::Validation { .. })));
        }
    }

    #[test]
    fn test_validate_vanity_name_limits() {
        assert!(validate_vanity_name("docs").is_ok());
        assert!(validate_vanity_name(&"é".repeat(255)).is_ok());
        assert!(validate_vanity_name(&"é".repeat(256)).is_err());
    }

    #[tokio::test]
    async fn test_get_short_link_not_found() {
        let mut short = MockShortLinkRepository::new();
        short.expect_find_by_id().times(1).returning(|_| Ok(None));

        let result = service(short, MockVanityLinkRepository::new())
            .get_short_link("missing0")
            .await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_vanity_link_found() {
        let mut vanity = MockVanityLinkRepository::new();
        vanity
            .expect_find_by_name()
            .withf(|name| name == "docs")
            .times(1)
            .returning(|name| Ok(Some(VanityLink::new(name.to_string(), "https://docs.rs".to_string()))));

        let link = service(MockShortLinkRepository::new(), vanity)
            .get_vanity_link("docs")
            .await
            .unwrap();

        assert_eq!(link.url, "https://docs.rs");
    }
}
