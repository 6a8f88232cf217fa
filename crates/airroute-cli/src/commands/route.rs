//! Route command handler for computing itineraries between airports.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use airroute_lib::{ensure_dataset, load_network, PathFinder, MAX_HOPS};

use crate::output::{OutputFormat, RouteContext};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Departure airport code.
    pub from: String,
    /// Arrival airport code.
    pub to: String,
    /// Maximum number of flights.
    pub max_hops: usize,
}

impl RouteCommandArgs {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            max_hops: MAX_HOPS,
        }
    }

    /// Codes as stored in the graph: trimmed and upper-cased.
    pub fn normalized_codes(&self) -> (String, String) {
        (normalize_code(&self.from), normalize_code(&self.to))
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Handle the route subcommand.
///
/// Loads the network from the resolved dataset and prints the least-distance
/// itinerary. Unknown airports surface as errors so the process exits
/// non-zero.
pub fn handle_route_command(
    target_path: Option<&Path>,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let paths = ensure_dataset(target_path)
        .context("failed to locate or download the OpenFlights dataset")?;
    let graph = load_network(&paths).with_context(|| {
        format!(
            "failed to load dataset from {}",
            paths.airports.parent().unwrap_or(&paths.airports).display()
        )
    })?;

    let (source, destination) = args.normalized_codes();
    debug!(%source, %destination, max_hops = args.max_hops, "planning route");

    let itinerary = PathFinder::new(&graph)
        .with_max_hops(args.max_hops)
        .find_shortest_path(&source, &destination)?;

    format.render_route(
        RouteContext {
            source: &source,
            destination: &destination,
            max_hops: args.max_hops,
        },
        &itinerary,
    )
}
