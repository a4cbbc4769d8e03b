//! Stop cluster directory.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::StopCluster;

use super::error::{DatasetError, read_json};

/// Resolves a raw stop identifier or slug into a cluster.
pub trait ClusterDirectory {
    /// Resolve by cluster id or slug.
    fn resolve(&self, id_or_slug: &str) -> Option<&StopCluster>;
}

/// Cluster directory held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClusterDirectory {
    clusters: Vec<StopCluster>,
    by_alias: HashMap<String, usize>,
}

impl InMemoryClusterDirectory {
    /// Build a directory. Ids take precedence over slugs on collision.
    pub fn new(clusters: Vec<StopCluster>) -> Self {
        let mut by_alias = HashMap::new();
        for (idx, cluster) in clusters.iter().enumerate() {
            if let Some(slug) = &cluster.slug {
                by_alias.entry(slug.clone()).or_insert(idx);
            }
        }
        for (idx, cluster) in clusters.iter().enumerate() {
            by_alias.insert(cluster.id.clone(), idx);
        }
        Self { clusters, by_alias }
    }

    /// Load a JSON array of clusters.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let clusters: Vec<StopCluster> = read_json(path.as_ref())?;
        Ok(Self::new(clusters))
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl ClusterDirectory for InMemoryClusterDirectory {
    fn resolve(&self, id_or_slug: &str) -> Option<&StopCluster> {
        self.by_alias
            .get(id_or_slug)
            .and_then(|&idx| self.clusters.get(idx))
    }
}
