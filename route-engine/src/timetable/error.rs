//! Timetable provider error types.

use std::path::PathBuf;

/// Errors from loading a timetable.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No timetable exists for the requested nuclei
    #[error("no timetable from nucleus {origin} to nucleus {destination}")]
    NotFound { origin: String, destination: String },

    /// A timetable file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timetable file was not valid JSON
    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The upstream service reported a failure
    #[error("upstream error: {0}")]
    Upstream(String),
}
