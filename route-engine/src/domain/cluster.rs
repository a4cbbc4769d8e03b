//! Stop clusters.

use serde::{Deserialize, Serialize};

/// A set of physically co-located stops treated as one logical place.
///
/// `stop_ids` is ordered: the declared order is used to rank contributing
/// stops in line matches and to break ties when deduplicating departures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopCluster {
    pub id: String,
    /// URL-friendly alias used by the cluster directory.
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub stop_ids: Vec<String>,
    pub consortium_id: u32,
    /// Grouping used by the timetable provider's request shape.
    pub nucleus_id: String,
    #[serde(default)]
    pub municipality: Option<String>,
}

impl StopCluster {
    /// Position of a stop in the declared order.
    pub fn position_of(&self, stop_id: &str) -> Option<usize> {
        self.stop_ids.iter().position(|s| s == stop_id)
    }

    /// Whether the stop belongs to this cluster.
    pub fn contains(&self, stop_id: &str) -> bool {
        self.position_of(stop_id).is_some()
    }

    /// Order `ids` by this cluster's declared stop order.
    ///
    /// Duplicates are dropped. Ids the cluster does not declare keep their
    /// relative order and are appended after the declared ones.
    pub fn order_ids<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        order_by(&self.stop_ids, ids)
    }
}

/// Order `ids` by their position in `declared`, appending stragglers.
pub(crate) fn order_by<'a, I>(declared: &[String], ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut unique: Vec<&String> = Vec::new();
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    // Stable sort keeps stragglers in first-seen order.
    unique.sort_by_key(|id| declared.iter().position(|d| d == *id).unwrap_or(usize::MAX));
    unique.into_iter().cloned().collect()
}
