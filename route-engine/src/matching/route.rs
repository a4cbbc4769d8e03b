//! End-to-end route matching between two clusters.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::connections::{ConnectionFinder, merge_connections};
use crate::dataset::StopDataset;
use crate::domain::{Direction, StopCluster, StopSignature};

use super::aggregate::collect_matches;
use super::selection::{RouteLineMatch, RouteSearchSelection, create_selection};

/// Runs the finder in both directions, merges, and aggregates line matches.
pub struct RouteMatcher<D> {
    finder: Arc<ConnectionFinder<D>>,
}

impl<D: StopDataset + Send + Sync + 'static> RouteMatcher<D> {
    /// Create a matcher sharing `finder`'s cache.
    pub fn new(finder: Arc<ConnectionFinder<D>>) -> Self {
        Self { finder }
    }

    /// The underlying finder.
    pub fn finder(&self) -> &Arc<ConnectionFinder<D>> {
        &self.finder
    }

    /// Lines joining any stop of `origin` to any stop of `destination`.
    pub async fn find_matches(
        &self,
        origin: &StopCluster,
        destination: &StopCluster,
    ) -> Vec<RouteLineMatch> {
        let signatures: Vec<StopSignature> = origin
            .stop_ids
            .iter()
            .map(|id| StopSignature::new(origin.consortium_id, id))
            .collect();

        let (forward, backward) = tokio::join!(
            self.finder.get_connections(&signatures, Direction::Forward),
            self.finder.get_connections(&signatures, Direction::Backward),
        );
        let merged = merge_connections([forward.as_ref(), backward.as_ref()]);
        let matches = collect_matches(origin, destination, &merged);

        debug!(
            origin = %origin.id,
            destination = %destination.id,
            matches = matches.len(),
            "matched lines between clusters"
        );
        matches
    }

    /// Build a selection for `origin` to `destination` on `query_date`.
    pub async fn select(
        &self,
        origin: &StopCluster,
        destination: &StopCluster,
        query_date: DateTime<Utc>,
    ) -> RouteSearchSelection {
        let matches = self.find_matches(origin, destination).await;
        create_selection(origin, destination, &matches, query_date)
    }
}
