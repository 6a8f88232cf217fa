//! Airport route finder HTTP microservice.
//!
//! # Configuration
//!
//! - `AIRROUTE_DATA_DIR` - Directory holding `airports.dat` and `routes.dat`
//!   (downloaded on first start when missing)
//! - `AIRROUTE_MAX_HOPS` - Flights allowed per itinerary (default: 4)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED` - Set to `false` to disable `/metrics`

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use airroute_lib::MAX_HOPS;
use airroute_service_route::router;
use airroute_service_shared::{
    AppState, LoggingConfig, MetricsConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let max_hops: usize = env::var("AIRROUTE_MAX_HOPS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or(MAX_HOPS);

    info!(port, max_hops, "starting route service");

    // Dataset download uses a blocking HTTP client.
    let state = tokio::task::spawn_blocking(move || AppState::load(None, max_hops))
        .await?
        .map_err(|e| {
            error!(error = %e, "failed to load application state");
            e
        })?;

    info!(
        airports = state.graph().airport_count(),
        connections = state.graph().connection_count(),
        "application state loaded"
    );

    let app = router(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
