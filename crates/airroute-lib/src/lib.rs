//! Airport route finder library entry points.
//!
//! This crate exposes helpers to fetch the OpenFlights dataset, parse it into
//! airports and routes, build the distance-weighted airport graph, and run
//! the hop-bounded least-distance search. Higher-level consumers (CLI, HTTP
//! service) should only depend on the functions exported here instead of
//! reimplementing behavior.

pub mod airport;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod graph;
pub mod openflights;
pub mod path;

pub use airport::{Airport, Route};
pub use dataset::{
    default_dataset_dir, ensure_dataset, ensure_dataset_from, DatasetPaths, DatasetSource,
};
pub use distance::{distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use error::{Error, Result};
pub use graph::{Connection, GraphStore, Vertex};
pub use openflights::{load_airports, load_network, load_routes, parse_airports, parse_routes};
pub use path::{find_shortest_path, Itinerary, ItineraryStop, PathFinder, MAX_HOPS};
