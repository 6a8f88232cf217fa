//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// When the probe was answered (RFC 3339, UTC).
    pub checked_at: String,

    /// Number of airports in the graph (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airports_loaded: Option<usize>,

    /// Number of directed connections in the graph (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections_loaded: Option<usize>,
}

impl HealthStatus {
    fn base(status: String, service: &str, version: &str) -> Self {
        Self {
            status,
            service: service.to_string(),
            version: version.to_string(),
            checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            airports_loaded: None,
            connections_loaded: None,
        }
    }

    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self::base("ok".to_string(), service, version)
    }

    /// Create a ready status with graph size information.
    pub fn ready(service: &str, version: &str, airports: usize, connections: usize) -> Self {
        Self {
            airports_loaded: Some(airports),
            connections_loaded: Some(connections),
            ..Self::base("ok".to_string(), service, version)
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self::base(format!("not_ready: {}", reason), service, version)
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"airroute-service-shared","version":"0.1.0","checked_at":"..."}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 503 until the airport graph holds at least one airport.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let graph = state.graph();
    if graph.is_empty() {
        let status = HealthStatus::not_ready(service, version, "no airports loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        graph.airport_count(),
        graph.connection_count(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
