//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthResponse, ProbeStatus, ServiceStatus, StoreProbe};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database check failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "backend": "sqlite" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let response = HealthResponse::from_database(probe_database(&state).await);

    match response.status {
        ServiceStatus::Healthy => Ok(Json(response)),
        ServiceStatus::Degraded => Err((StatusCode::SERVICE_UNAVAILABLE, Json(response))),
    }
}

async fn probe_database(state: &AppState) -> StoreProbe {
    let backend = state.db.kind().to_string();

    match state.db.ping().await {
        Ok(()) => StoreProbe {
            status: ProbeStatus::Ok,
            backend,
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            StoreProbe {
                status: ProbeStatus::Error,
                backend,
                message: Some("Database unreachable".to_string()),
            }
        }
    }
}
