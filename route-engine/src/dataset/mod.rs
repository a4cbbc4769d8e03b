//! Stop dataset and cluster directory.
//!
//! Both are consumed collaborators: the caller loads them once and the
//! engine only reads them. In-memory implementations backed by JSON files
//! are provided for the binary and for tests.

mod clusters;
mod error;
mod stops;

pub use clusters::{ClusterDirectory, InMemoryClusterDirectory};
pub use error::DatasetError;
pub use stops::{InMemoryDataset, ServedLine, StopDataset, StopProfile};
