//! Handlers for link creation.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::link::{AddUrlRequest, AddVanityRequest};
use crate::domain::entities::{ShortLink, VanityLink};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link under a random 8-character ID.
///
/// # Endpoint
///
/// `POST /add` (link-creator key)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.org" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": "aB3dE5gH", "url": "https://example.org" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty or too long.
/// Returns 503 Service Unavailable if no free ID was found.
pub async fn add_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<AddUrlRequest>,
) -> Result<Json<ShortLink>, AppError> {
    payload.validate()?;

    let link = state.link_service.create_short_link(payload.url).await?;

    tracing::info!(id = %link.id, "Short link created");

    Ok(Json(link))
}

/// Creates a vanity link.
///
/// `POST /add/v` (link-creator key) with `{"name", "url"}`.
///
/// # Errors
///
/// Returns 409 Conflict if the name is taken. Existing names are never
/// overwritten.
pub async fn add_vanity_handler(
    State(state): State<AppState>,
    Json(payload): Json<AddVanityRequest>,
) -> Result<Json<VanityLink>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_vanity_link(payload.name, payload.url)
        .await?;

    tracing::info!(name = %link.name, "Vanity link created");

    Ok(Json(link))
}
