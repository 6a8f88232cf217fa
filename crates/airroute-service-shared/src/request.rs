//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for request types.
pub trait Validate {
    /// Validate the request, returning a problem for invalid input.
    ///
    /// The `request_id` populates the `instance` field of the returned
    /// `ProblemDetails`, which is boxed to keep the `Err` variant small.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Query string of `GET /route?src=XXX&dest=YYY`.
///
/// Missing parameters deserialize as empty strings so that validation, not
/// the extractor, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Departure airport IATA code.
    #[serde(default)]
    pub src: String,

    /// Arrival airport IATA code.
    #[serde(default)]
    pub dest: String,
}

impl RouteQuery {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }

    /// Codes as stored in the graph: trimmed and upper-cased.
    pub fn normalized(&self) -> (String, String) {
        (
            self.src.trim().to_ascii_uppercase(),
            self.dest.trim().to_ascii_uppercase(),
        )
    }
}

impl Validate for RouteQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.src.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'src' query parameter is required and cannot be empty",
                request_id,
            )));
        }

        if self.dest.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'dest' query parameter is required and cannot be empty",
                request_id,
            )));
        }

        Ok(())
    }
}
