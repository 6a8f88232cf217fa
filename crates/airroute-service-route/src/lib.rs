//! Airport route finder HTTP microservice.
//!
//! # Endpoints
//!
//! - `GET /route?src=XXX&dest=YYY` - Least-distance itinerary between two airports
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use airroute_lib::{Error as LibError, Itinerary};
use airroute_service_shared::{
    AppState, MetricsConfig, MetricsLayer, ProblemDetails, RouteQuery, ServiceResponse, Validate,
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, metrics_handler,
    record_route_calculated, record_route_distance, record_route_failed, record_route_hops,
};

/// Service label attached to business metrics.
pub const SERVICE_NAME: &str = "route";

/// Body of a successful `/route` response.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Stops from source to destination; empty when no route qualifies.
    pub data: Itinerary,
    /// Number of flights.
    pub hops: usize,
    /// Total distance in kilometres.
    pub distance: f64,
}

impl From<Itinerary> for RouteResponse {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            hops: itinerary.hop_count(),
            distance: itinerary.total_distance_km(),
            data: itinerary,
        }
    }
}

/// Router with the default metrics configuration.
pub fn app(state: AppState) -> Router {
    router(state, &MetricsConfig::default())
}

/// Build the service router. The metrics endpoint is mounted only when
/// enabled.
pub fn router(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route("/route", get(route_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET])
                .allow_origin(Any),
        )
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `GET /route?src=XXX&dest=YYY`.
pub async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            record_route_failed("validation_error", SERVICE_NAME);
            return ProblemDetails::bad_request(rejection.body_text(), request_id).into_response();
        }
    };

    if let Err(problem) = query.validate(&request_id) {
        record_route_failed("validation_error", SERVICE_NAME);
        return (*problem).into_response();
    }

    let (source, destination) = query.normalized();
    info!(
        request_id = %request_id,
        src = %source,
        dest = %destination,
        max_hops = state.max_hops(),
        "handling route request"
    );

    let itinerary = match state
        .path_finder()
        .find_shortest_path(&source, &destination)
    {
        Ok(itinerary) => itinerary,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "route lookup failed");
            let reason = match e {
                LibError::AirportNotFound { .. } => "unknown_airport",
                _ => "internal_error",
            };
            record_route_failed(reason, SERVICE_NAME);
            return from_lib_error(&e, &request_id).into_response();
        }
    };

    let response = RouteResponse::from(itinerary);
    record_route_calculated(!response.data.is_empty(), SERVICE_NAME);
    if !response.data.is_empty() {
        record_route_hops(response.hops);
        record_route_distance(response.distance);
    }

    info!(
        request_id = %request_id,
        hops = response.hops,
        distance_km = response.distance,
        "route computed"
    );

    (StatusCode::OK, ServiceResponse::new(response)).into_response()
}
