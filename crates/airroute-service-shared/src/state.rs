//! Application state for HTTP services.
//!
//! Holds the airport graph that every handler searches. The graph is built
//! once at startup and shared read-only.

use std::path::Path;
use std::sync::Arc;

use airroute_lib::{ensure_dataset, load_network, GraphStore, PathFinder, MAX_HOPS};
use airroute_lib::Error as LibError;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The dataset files could not be located or fetched.
    DatasetUnavailable(LibError),

    /// The dataset files could not be parsed into a graph.
    NetworkLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetUnavailable(e) => write!(f, "dataset unavailable: {}", e),
            Self::NetworkLoad(e) => write!(f, "failed to load airport network: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetUnavailable(e) | Self::NetworkLoad(e) => Some(e),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; share it via axum's `State` extractor.
///
/// ```ignore
/// use axum::{extract::State, routing::get, Router};
/// use airroute_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let finder = state.path_finder();
///     // ... run a search
/// }
///
/// let state = AppState::load(None, 4).unwrap();
/// let app = Router::new().route("/route", get(handler)).with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    graph: Arc<GraphStore>,
    max_hops: usize,
}

impl AppState {
    /// Resolve the dataset (downloading it if needed) and build the graph.
    ///
    /// `data_dir` follows the same resolution as
    /// [`airroute_lib::ensure_dataset`].
    pub fn load(data_dir: Option<&Path>, max_hops: usize) -> Result<Self, AppStateError> {
        let paths = ensure_dataset(data_dir).map_err(AppStateError::DatasetUnavailable)?;

        tracing::info!(
            airports = %paths.airports.display(),
            routes = %paths.routes.display(),
            "loading airport network"
        );
        let graph = load_network(&paths).map_err(AppStateError::NetworkLoad)?;
        tracing::info!(
            airport_count = graph.airport_count(),
            connection_count = graph.connection_count(),
            "airport network loaded"
        );

        Ok(Self::from_graph(graph).with_max_hops(max_hops))
    }

    /// Wrap an already built graph with the default hop ceiling.
    pub fn from_graph(graph: GraphStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                graph: Arc::new(graph),
                max_hops: MAX_HOPS,
            }),
        }
    }

    /// Same graph, different hop ceiling.
    pub fn with_max_hops(self, max_hops: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                graph: Arc::clone(&self.inner.graph),
                max_hops,
            }),
        }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.inner.graph
    }

    pub fn max_hops(&self) -> usize {
        self.inner.max_hops
    }

    /// Path finder over the shared graph using the configured hop ceiling.
    pub fn path_finder(&self) -> PathFinder<'_> {
        PathFinder::new(&self.inner.graph).with_max_hops(self.inner.max_hops)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("airport_count", &self.inner.graph.airport_count())
            .field("max_hops", &self.inner.max_hops)
            .finish()
    }
}
