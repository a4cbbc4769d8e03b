//! Memoized connection finder.
//!
//! Results are cached per `(direction, sorted origin signatures)`. The cache
//! has no TTL and no capacity bound: the keyspace is bounded by the clusters
//! users can select, and a dataset is immutable for the life of the finder.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use moka::future::Cache as MokaCache;
use tracing::{debug, trace};

use crate::dataset::StopDataset;
use crate::domain::{Connections, Direction, LineSignature, StopConnection, StopSignature};

/// Cache key: direction plus sorted, deduplicated origin signatures.
type ConnectionKey = (Direction, Vec<StopSignature>);

/// Finds stops reachable from a set of origin stops.
pub struct ConnectionFinder<D> {
    dataset: Arc<D>,
    cache: MokaCache<ConnectionKey, Arc<Connections>>,
    computations: AtomicUsize,
}

impl<D: StopDataset + Send + Sync + 'static> ConnectionFinder<D> {
    /// Create a finder over an already-loaded dataset.
    pub fn new(dataset: Arc<D>) -> Self {
        Self {
            dataset,
            cache: MokaCache::builder().build(),
            computations: AtomicUsize::new(0),
        }
    }

    /// Get every stop reachable from `origins` travelling in `direction`.
    ///
    /// Origin order does not matter. Concurrent callers asking for the same
    /// key share one computation. An empty mapping is a valid result.
    pub async fn get_connections(
        &self,
        origins: &[StopSignature],
        direction: Direction,
    ) -> Arc<Connections> {
        let key = cache_key(origins, direction);
        let signatures = key.1.clone();

        self.cache
            .get_with(key, async move {
                self.computations.fetch_add(1, Ordering::Relaxed);
                let connections = self.compute(&signatures, direction);
                debug!(
                    %direction,
                    origins = signatures.len(),
                    reachable = connections.len(),
                    "computed stop connections"
                );
                Arc::new(connections)
            })
            .await
    }

    /// Number of times a result was actually computed rather than served
    /// from the cache.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    /// Number of cached keys.
    pub async fn cached_key_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    fn compute(&self, origins: &[StopSignature], direction: Direction) -> Connections {
        // Who offers each line-direction, and where along it they sit.
        let mut offered: HashMap<&LineSignature, Vec<(&str, Option<u32>)>> = HashMap::new();
        for signature in origins {
            let Some(profile) = self.dataset.stop(signature) else {
                trace!(stop = %signature.stop_id, "origin stop not in dataset");
                continue;
            };
            for line in &profile.lines {
                offered
                    .entry(&line.signature)
                    .or_default()
                    .push((profile.stop_id.as_str(), line.sequence));
            }
        }

        let mut connections = Connections::new();
        if offered.is_empty() {
            return connections;
        }

        let consortia: HashSet<u32> = origins.iter().map(|s| s.consortium_id).collect();
        let origin_stops: HashSet<(u32, &str)> = origins
            .iter()
            .map(|s| (s.consortium_id, s.stop_id.as_str()))
            .collect();

        for profile in self.dataset.stops() {
            if !consortia.contains(&profile.consortium_id)
                || origin_stops.contains(&(profile.consortium_id, profile.stop_id.as_str()))
            {
                continue;
            }

            let mut connection = StopConnection::new(profile.consortium_id, &profile.stop_id);
            for line in &profile.lines {
                let Some(offers) = offered.get(&line.signature) else {
                    continue;
                };
                for &(origin_id, origin_seq) in offers {
                    if reaches(direction, origin_seq, line.sequence) {
                        connection.add_line(&line.signature, origin_id);
                    }
                }
            }

            if !connection.is_empty() {
                connections.insert(connection.key(), connection);
            }
        }

        connections
    }
}

/// Build the cache key for a query.
fn cache_key(origins: &[StopSignature], direction: Direction) -> ConnectionKey {
    let mut signatures = origins.to_vec();
    signatures.sort();
    signatures.dedup();
    (direction, signatures)
}

/// Whether a stop at `candidate` is reached from `origin` in `direction`.
/// Unknown positions always match.
fn reaches(direction: Direction, origin: Option<u32>, candidate: Option<u32>) -> bool {
    match (origin, candidate) {
        (Some(o), Some(c)) => match direction {
            Direction::Forward => c > o,
            Direction::Backward => c < o,
        },
        _ => true,
    }
}
