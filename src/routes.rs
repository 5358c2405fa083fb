//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`, `/{token}`, `/v/{name}`  - Stored-link redirects (public)
//! - `GET  /a/{code}`, `/at/{code}`    - Encoded-link redirects (public)
//! - `GET  /health`                   - Health check (public)
//! - `POST /add`, `/add/v`            - Link creation (any key)
//! - `/admin/*`                       - Key management (admin key)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline, `408` when exceeded
//! - **Authorization** - `access_token` cookie, per route group

use crate::api;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::{Router, middleware};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline for each request; when it fires the
///   in-flight handler, including its store call, is dropped
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let creator = api::routes::creator_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::link_creator_layer,
    ));

    let admin = api::routes::admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::admin_layer,
    ));

    Router::new()
        .merge(api::routes::public_routes())
        .merge(creator)
        .merge(admin)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(tracing::layer())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseKind;
    use crate::infrastructure::database::Database;
    use axum::body::Body;
    use axum::http::{Request, header};
    use sqlx::any::AnyPoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect_lazy("sqlite::memory:")
            .unwrap();
        let db = Arc::new(Database::from_pool(pool, DatabaseKind::Sqlite));

        app_router(
            AppState::new(db, "https://root.example".to_string()),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_root_redirect() {
        let response = test_router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://root.example"
        );
    }

    #[tokio::test]
    async fn test_admin_routes_require_cookie() {
        let response = test_router()
            .oneshot(Request::get("/admin/keys").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
