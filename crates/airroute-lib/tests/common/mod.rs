//! Shared fixtures for integration tests.

use std::path::PathBuf;

use airroute_lib::{load_network, Airport, DatasetPaths, GraphStore};

/// Directory holding the checked-in OpenFlights sample files.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/openflights")
}

#[allow(dead_code)]
pub fn fixture_paths() -> DatasetPaths {
    DatasetPaths::in_dir(&fixtures_dir())
}

/// Graph built from the sample dataset.
#[allow(dead_code)]
pub fn fixture_graph() -> GraphStore {
    load_network(&fixture_paths()).expect("fixture dataset loads")
}

/// Build a graph with hand-picked edge weights. Coordinates are irrelevant
/// because edges are added directly.
#[allow(dead_code)]
pub fn weighted_graph(edges: &[(&str, &str, f64)]) -> GraphStore {
    let mut graph = GraphStore::new();
    for (source, destination, weight) in edges {
        let source = Airport::new(*source, format!("{source} Field"), 0.0, 0.0);
        let destination = Airport::new(*destination, format!("{destination} Field"), 0.0, 0.0);
        graph.add_vertex(source.clone());
        graph.add_vertex(destination.clone());
        graph.add_edge(&source, &destination, *weight);
    }
    graph
}

/// Exhaustive minimum over every walk of at most `max_hops` flights.
#[allow(dead_code)]
pub fn brute_force_distance(
    graph: &GraphStore,
    source: &str,
    destination: &str,
    max_hops: usize,
) -> Option<f64> {
    fn walk(
        graph: &GraphStore,
        current: &str,
        destination: &str,
        hops_left: usize,
        distance: f64,
        best: &mut Option<f64>,
    ) {
        if hops_left == 0 {
            return;
        }
        for connection in graph.connections(current) {
            let next = distance + connection.distance_km;
            if connection.target == destination {
                if best.map_or(true, |b| next < b) {
                    *best = Some(next);
                }
                continue;
            }
            walk(graph, &connection.target, destination, hops_left - 1, next, best);
        }
    }

    let mut best = None;
    walk(graph, source, destination, max_hops, 0.0, &mut best);
    best
}
