use std::collections::HashMap;

use tracing::debug;

use crate::airport::{Airport, Route};
use crate::distance::distance_km;
use crate::error::Result;

/// Weighted edge toward a neighbouring airport.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub target: String,
    pub distance_km: f64,
}

/// Airport record together with its adjacency list.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub airport: Airport,
    pub connections: Vec<Connection>,
}

impl Vertex {
    fn connects_to(&self, code: &str) -> bool {
        self.connections.iter().any(|c| c.target == code)
    }
}

/// Adjacency-list graph of airports keyed by IATA code.
///
/// The graph is assembled once (see [`GraphStore::build`]) and then shared
/// read-only between searches.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    vertices: HashMap<String, Vertex>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from airports and routes.
    ///
    /// All vertices are inserted before any edge so that routes never point
    /// at an airport that would only be added later. Routes with an unknown
    /// endpoint are dropped.
    pub fn build<I>(airports: I, routes: &[Route]) -> Result<Self>
    where
        I: IntoIterator<Item = Airport>,
    {
        let mut graph = Self::new();
        for airport in airports {
            graph.add_vertex(airport);
        }

        let mut dropped = 0usize;
        for route in routes {
            let (Some(source), Some(destination)) = (
                graph.airport(&route.source_code).cloned(),
                graph.airport(&route.destination_code).cloned(),
            ) else {
                dropped += 1;
                continue;
            };

            let distance = distance_km(&source, &destination)?;
            graph.add_edge(&source, &destination, distance);
        }

        debug!(
            airports = graph.airport_count(),
            connections = graph.connection_count(),
            routes = routes.len(),
            dropped_routes = dropped,
            "airport graph built"
        );

        Ok(graph)
    }

    /// Insert a vertex for `airport` unless one already exists for its code.
    ///
    /// Returns `true` when the vertex was inserted.
    pub fn add_vertex(&mut self, airport: Airport) -> bool {
        if self.vertices.contains_key(&airport.code) {
            return false;
        }

        self.vertices.insert(
            airport.code.clone(),
            Vertex {
                airport,
                connections: Vec::new(),
            },
        );
        true
    }

    /// Connect two airports in both directions.
    ///
    /// Each side is only updated when its vertex exists and it does not
    /// already hold a connection toward the other airport.
    pub fn add_edge(&mut self, source: &Airport, destination: &Airport, distance_km: f64) {
        self.push_connection(&source.code, &destination.code, distance_km);
        self.push_connection(&destination.code, &source.code, distance_km);
    }

    fn push_connection(&mut self, from: &str, to: &str, distance_km: f64) {
        let Some(vertex) = self.vertices.get_mut(from) else {
            return;
        };

        if vertex.connects_to(to) {
            return;
        }

        vertex.connections.push(Connection {
            target: to.to_string(),
            distance_km,
        });
    }

    pub fn vertex(&self, code: &str) -> Option<&Vertex> {
        self.vertices.get(code)
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.vertices.get(code).map(|vertex| &vertex.airport)
    }

    pub fn has_vertex(&self, code: &str) -> bool {
        self.vertices.contains_key(code)
    }

    /// Return the connections for a given airport, or an empty slice.
    pub fn connections(&self, code: &str) -> &[Connection] {
        self.vertices
            .get(code)
            .map(|vertex| vertex.connections.as_slice())
            .unwrap_or(&[])
    }

    pub fn airport_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed adjacency entries (each route counts twice).
    pub fn connection_count(&self) -> usize {
        self.vertices.values().map(|v| v.connections.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
