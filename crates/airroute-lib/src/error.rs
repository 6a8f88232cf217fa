use thiserror::Error;

/// Convenient result alias for the airport route library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a distance calculation receives an empty airport.
    #[error("{message}")]
    InvalidInput { message: String },

    /// Raised when the haversine formula produced a non-numeric result.
    #[error("invalid distance calculation")]
    ComputationError,

    /// Raised when a search references a code that has no vertex in the graph.
    #[error("Airport by {code} code not found")]
    AirportNotFound { code: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for dataset storage")]
    DatasetDirUnavailable,

    /// Raised when a dataset file could not be fetched.
    #[error("failed to download {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    /// Raised when a dataset source override is missing one of its files.
    #[error("dataset source {path} is missing {file}")]
    DatasetSourceIncomplete {
        path: std::path::PathBuf,
        file: &'static str,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn airport_not_found(code: &str) -> Self {
        Error::AirportNotFound {
            code: code.to_string(),
        }
    }
}
