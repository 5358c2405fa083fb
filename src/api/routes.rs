//! API route configuration.
//!
//! Routes are grouped by the key they require so the caller can attach the
//! matching [`crate::api::middleware::auth`] layer.

use crate::api::handlers::{
    add_url_handler, add_vanity_handler, create_key_handler, encoded_http_handler,
    encoded_https_handler, get_key_handler, health_handler, list_keys_handler, resolve_handler,
    root_handler, vanity_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes open to everyone.
///
/// # Endpoints
///
/// - `GET /`           - Redirect to the root URL
/// - `GET /health`     - Health check
/// - `GET /{token}`    - Short link, then vanity, redirect
/// - `GET /v/{name}`   - Vanity redirect
/// - `GET /a/{code}`   - Encoded link over HTTPS
/// - `GET /at/{code}`  - Encoded link over HTTP
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/{token}", get(resolve_handler))
        .route("/v/{name}", get(vanity_handler))
        .route("/a/{code}", get(encoded_https_handler))
        .route("/at/{code}", get(encoded_http_handler))
}

/// Routes for any valid key.
///
/// - `POST /add`    - Create a short link
/// - `POST /add/v`  - Create a vanity link
pub fn creator_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_url_handler))
        .route("/add/v", post(add_vanity_handler))
}

/// Routes for admin keys.
///
/// - `GET  /admin/keys`          - List key records
/// - `GET  /admin/key/{digest}`  - One key record
/// - `POST /admin/key`           - Issue a key
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/keys", get(list_keys_handler))
        .route("/admin/key/{digest}", get(get_key_handler))
        .route("/admin/key", post(create_key_handler))
}
