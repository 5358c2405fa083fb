//! Cookie-based API key authorization.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::application::services::Access;
use crate::{error::AppError, state::AppState};

/// Cookie carrying the plaintext API key.
pub const ACCESS_COOKIE: &str = "access_token";

/// Admits any stored key.
///
/// # Cookie Format
///
/// ```text
/// Cookie: access_token=<key>
/// ```
///
/// On success the matching [`crate::domain::entities::ApiKey`] is inserted
/// into the request extensions.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the cookie is missing or the key is unknown.
/// Returns `500` if the key store cannot be queried.
///
/// # Example
///
/// ```rust,ignore
/// let creator = api::routes::creator_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::link_creator_layer));
/// ```
pub async fn link_creator_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(st, req, next, Access::LinkCreator).await
}

/// Admits admin keys only.
///
/// # Errors
///
/// As [`link_creator_layer`], plus `403 Forbidden` for a valid key without
/// admin rights.
pub async fn admin_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(st, req, next, Access::Admin).await
}

async fn guard(
    st: AppState,
    mut req: Request,
    next: Next,
    access: Access,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());
    let token = jar.get(ACCESS_COOKIE).map(|c| c.value().to_owned());

    let key = st.key_service.authorize(token.as_deref(), access).await?;

    req.extensions_mut().insert(key);

    Ok(next.run(req).await)
}
