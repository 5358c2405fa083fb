//! Body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    /// Derives the overall status from the store probe.
    pub fn from_database(database: StoreProbe) -> Self {
        let status = match database.status {
            ProbeStatus::Ok => ServiceStatus::Healthy,
            ProbeStatus::Error => ServiceStatus::Degraded,
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { database },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: StoreProbe,
}

/// Outcome of pinging the link store.
#[derive(Debug, Serialize)]
pub struct StoreProbe {
    pub status: ProbeStatus,
    /// Backend name: `postgres`, `mysql` or `sqlite`.
    pub backend: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
