//! Handlers for API key administration. All require an admin key.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::key::{CreateKeyRequest, IssuedKeyResponse, KeyListResponse, KeyResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /admin/keys`
pub async fn list_keys_handler(
    State(state): State<AppState>,
) -> Result<Json<KeyListResponse>, AppError> {
    let keys = state.key_service.list_keys().await?;

    Ok(Json(keys.into()))
}

/// Returns one key record by its hex digest.
///
/// `GET /admin/key/{digest}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown digest.
pub async fn get_key_handler(
    Path(digest): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<KeyResponse>, AppError> {
    let key = state.key_service.find_key_by_digest(&digest).await?;

    Ok(Json(key.into()))
}

/// Issues a new key and returns its plaintext once.
///
/// `POST /admin/key` with `{"admin": true}` or `{}`.
pub async fn create_key_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateKeyRequest>,
) -> Result<Json<IssuedKeyResponse>, AppError> {
    let issued = state.key_service.create_key(payload.admin).await?;

    Ok(Json(issued.into()))
}
