//! Handlers for stored-link redirects.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::api::middleware::tracing::record_namespace;
use crate::error::AppError;
use crate::state::AppState;

/// Sends the bare root to the configured landing page.
///
/// `GET /` → 307
pub async fn root_handler(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.root_url)
}

/// Redirects a token to its destination.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// The token is looked up as a short link ID first and as a vanity name only
/// if no short link exists.
///
/// # Errors
///
/// Returns 404 Not Found if neither namespace knows the token.
pub async fn resolve_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let resolution = state.resolver_service.resolve(&token).await?;

    record_namespace(resolution.namespace());
    tracing::debug!(%token, ?resolution, "Resolved token");

    Ok(Redirect::temporary(resolution.url()))
}

/// Redirects through the vanity namespace only.
///
/// `GET /v/{name}`
pub async fn vanity_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.get_vanity_link(&name).await?;
    record_namespace("vanity");

    Ok(Redirect::temporary(&link.url))
}
