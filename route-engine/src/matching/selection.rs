//! Line matches and route search selections.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::StopCluster;

/// A canonical (line, direction) pairing between two clusters.
///
/// Stop id lists contain no duplicates and follow the owning cluster's
/// declared stop order, with undeclared ids appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLineMatch {
    pub line_id: String,
    pub line_code: String,
    pub direction: u8,
    pub origin_stop_ids: Vec<String>,
    pub destination_stop_ids: Vec<String>,
}

impl RouteLineMatch {
    /// Priority of an origin stop: its position in this match's origin
    /// order. Lower is better.
    pub fn origin_priority(&self, stop_id: &str) -> Option<usize> {
        self.origin_stop_ids.iter().position(|s| s == stop_id)
    }
}

/// What the user asked for: two clusters, a date, and the lines joining them.
///
/// Frozen once built. Clones share the match list.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSearchSelection {
    origin: StopCluster,
    destination: StopCluster,
    query_date: DateTime<Utc>,
    line_matches: Arc<[RouteLineMatch]>,
}

impl RouteSearchSelection {
    pub fn origin(&self) -> &StopCluster {
        &self.origin
    }

    pub fn destination(&self) -> &StopCluster {
        &self.destination
    }

    pub fn query_date(&self) -> DateTime<Utc> {
        self.query_date
    }

    pub fn line_matches(&self) -> &[RouteLineMatch] {
        &self.line_matches
    }

    /// Whether no line joins the two clusters.
    pub fn is_empty(&self) -> bool {
        self.line_matches.is_empty()
    }

    /// First match for a line, optionally restricted to one direction.
    pub fn match_for(&self, line_id: &str, direction: Option<u8>) -> Option<&RouteLineMatch> {
        self.line_matches
            .iter()
            .find(|m| m.line_id == line_id && direction.is_none_or(|d| d == m.direction))
    }
}

/// Build a selection from independent copies of its inputs.
pub fn create_selection(
    origin: &StopCluster,
    destination: &StopCluster,
    matches: &[RouteLineMatch],
    query_date: DateTime<Utc>,
) -> RouteSearchSelection {
    RouteSearchSelection {
        origin: origin.clone(),
        destination: destination.clone(),
        query_date,
        line_matches: matches.iter().cloned().collect(),
    }
}
