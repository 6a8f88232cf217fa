use serde::Serialize;

use crate::distance::GeoPoint;

/// An airport as loaded from the dataset. The IATA code is the graph key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Airport {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Geographic position of the airport in degrees.
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// An airport without a code carries no usable identity.
    pub fn is_empty(&self) -> bool {
        self.code.trim().is_empty()
    }
}

/// A flight between two airports, identified by IATA (3-letter) or ICAO
/// (4-letter) codes. Direction is irrelevant once loaded into the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub source_code: String,
    pub destination_code: String,
}

impl Route {
    pub fn new(source_code: impl Into<String>, destination_code: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
            destination_code: destination_code.into(),
        }
    }
}
