//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{KeyService, LinkService, ResolverService};
use crate::infrastructure::database::Database;
use crate::infrastructure::persistence::{
    SqlKeyRepository, SqlShortLinkRepository, SqlVanityLinkRepository,
};

pub type Links = LinkService<SqlShortLinkRepository, SqlVanityLinkRepository>;
pub type Resolver = ResolverService<SqlShortLinkRepository, SqlVanityLinkRepository>;
pub type Keys = KeyService<SqlKeyRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<Links>,
    pub resolver_service: Arc<Resolver>,
    pub key_service: Arc<Keys>,
    pub db: Arc<Database>,
    /// Redirect target for `GET /`.
    pub root_url: String,
}

impl AppState {
    /// Wires the SQL repositories and services over one database handle.
    pub fn new(db: Arc<Database>, root_url: String) -> Self {
        let short_links = Arc::new(SqlShortLinkRepository::new(db.clone()));
        let vanity_links = Arc::new(SqlVanityLinkRepository::new(db.clone()));
        let keys = Arc::new(SqlKeyRepository::new(db.clone()));

        let link_service = Arc::new(LinkService::new(short_links, vanity_links));
        let resolver_service = Arc::new(ResolverService::new(link_service.clone()));
        let key_service = Arc::new(KeyService::new(keys));

        Self {
            link_service,
            resolver_service,
            key_service,
            db,
            root_url,
        }
    }
}
