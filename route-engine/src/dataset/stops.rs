//! Stop profiles and the dataset that serves them.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{LineSignature, StopSignature};

use super::error::{DatasetError, read_json};

/// A line-direction served at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServedLine {
    #[serde(flatten)]
    pub signature: LineSignature,
    /// Position of the stop along this line-direction, if known.
    #[serde(default)]
    pub sequence: Option<u32>,
}

impl ServedLine {
    /// A served line with no known position.
    pub fn new(signature: LineSignature) -> Self {
        Self {
            signature,
            sequence: None,
        }
    }

    /// A served line at a known position.
    pub fn at(signature: LineSignature, sequence: u32) -> Self {
        Self {
            signature,
            sequence: Some(sequence),
        }
    }
}

/// Everything the engine needs to know about one stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopProfile {
    pub stop_id: String,
    pub consortium_id: u32,
    pub nucleus_id: String,
    #[serde(default)]
    pub name: String,
    pub lines: Vec<ServedLine>,
}

impl StopProfile {
    /// The signature identifying this stop.
    pub fn signature(&self) -> StopSignature {
        StopSignature::new(self.consortium_id, &self.stop_id)
    }
}

/// Source of stop profiles.
///
/// Assumed already loaded: lookups are synchronous and cheap.
pub trait StopDataset {
    /// Look up a single stop.
    fn stop(&self, signature: &StopSignature) -> Option<&StopProfile>;

    /// Enumerate every stop.
    fn stops(&self) -> Box<dyn Iterator<Item = &StopProfile> + '_>;
}

/// Stop dataset held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    stops: HashMap<StopSignature, StopProfile>,
}

impl InMemoryDataset {
    /// Build a dataset from profiles. Later duplicates replace earlier ones.
    pub fn new(profiles: impl IntoIterator<Item = StopProfile>) -> Self {
        let stops = profiles
            .into_iter()
            .map(|p| (p.signature(), p))
            .collect();
        Self { stops }
    }

    /// Load a JSON array of stop profiles.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let profiles: Vec<StopProfile> = read_json(path.as_ref())?;
        Ok(Self::new(profiles))
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the dataset has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl StopDataset for InMemoryDataset {
    fn stop(&self, signature: &StopSignature) -> Option<&StopProfile> {
        self.stops.get(signature)
    }

    fn stops(&self) -> Box<dyn Iterator<Item = &StopProfile> + '_> {
        Box::new(self.stops.values())
    }
}
