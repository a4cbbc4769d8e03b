//! Dataset loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading a dataset from disk.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape
    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, DatasetError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}
