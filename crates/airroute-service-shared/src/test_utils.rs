//! Test utilities for handler testing.
//!
//! Provides an [`AppState`] built from the checked-in OpenFlights sample.

use std::path::PathBuf;
use std::sync::OnceLock;

use airroute_lib::{load_network, DatasetPaths};

use crate::state::AppState;

/// Directory holding the sample `airports.dat` and `routes.dat`.
pub const TEST_FIXTURE_DIR: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/openflights"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared state loaded from the fixture dataset. Loaded once per process.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded, which indicates a broken checkout.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let paths = fixture_paths();
            let graph = load_network(&paths)
                .unwrap_or_else(|e| panic!("failed to load fixture from {:?}: {}", paths, e));
            AppState::from_graph(graph)
        })
        .clone()
}

pub fn fixture_paths() -> DatasetPaths {
    DatasetPaths::in_dir(&PathBuf::from(TEST_FIXTURE_DIR))
}

/// Airport codes present in the fixture.
pub mod fixture_airports {
    /// Tallinn, connected to ARN, HEL, RIX and SVO.
    pub const TLL: &str = "TLL";

    /// Stockholm-Arlanda, the cheapest TLL to DUB transfer.
    pub const ARN: &str = "ARN";

    /// Dublin.
    pub const DUB: &str = "DUB";

    /// New York JFK, three flights from TLL.
    pub const JFK: &str = "JFK";
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
