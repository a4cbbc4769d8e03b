//! Stop connection records.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::{LineSignature, StopKey};

/// "This stop is reachable from these origin stops via these lines."
///
/// Built fresh per query. `origin_stop_ids` is an ordered set: ids appear
/// once, in discovery order. It covers every line; `line_origins` narrows
/// it to the origins offering each line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopConnection {
    pub consortium_id: u32,
    pub stop_id: String,
    pub origin_stop_ids: Vec<String>,
    pub line_signatures: BTreeSet<LineSignature>,
    #[serde(skip)]
    line_origins: BTreeMap<LineSignature, Vec<String>>,
}

/// Reachable stops keyed by `consortiumId|stopId`.
pub type Connections = HashMap<StopKey, StopConnection>;

impl StopConnection {
    /// Create a connection with no origins or lines yet.
    pub fn new(consortium_id: u32, stop_id: impl Into<String>) -> Self {
        Self {
            consortium_id,
            stop_id: stop_id.into(),
            origin_stop_ids: Vec::new(),
            line_signatures: BTreeSet::new(),
            line_origins: BTreeMap::new(),
        }
    }

    /// The map key for this connection's stop.
    pub fn key(&self) -> StopKey {
        StopKey::new(self.consortium_id, &self.stop_id)
    }

    /// Returns a new connection combining this one with `other`.
    ///
    /// Origins keep this connection's order, then `other`'s unseen ids,
    /// both overall and per line. Line signatures are unioned.
    pub fn merged_with(&self, other: &StopConnection) -> StopConnection {
        let mut merged = self.clone();
        for id in &other.origin_stop_ids {
            merged.add_origin(id);
        }
        merged
            .line_signatures
            .extend(other.line_signatures.iter().cloned());
        for (signature, ids) in &other.line_origins {
            let existing = merged.line_origins.entry(signature.clone()).or_default();
            for id in ids {
                push_unique(existing, id);
            }
        }
        merged
    }

    /// Record that `origin_id` reaches this stop on `signature`.
    pub fn add_line(&mut self, signature: &LineSignature, origin_id: &str) {
        self.add_origin(origin_id);
        self.line_signatures.insert(signature.clone());
        push_unique(
            self.line_origins.entry(signature.clone()).or_default(),
            origin_id,
        );
    }

    /// Origins that reach this stop on `signature`, in discovery order.
    ///
    /// Connections built without per-line origins, such as deserialized
    /// ones, answer with every origin.
    pub fn origins_via(&self, signature: &LineSignature) -> &[String] {
        self.line_origins
            .get(signature)
            .map_or(self.origin_stop_ids.as_slice(), Vec::as_slice)
    }

    /// Whether any origin or line has been recorded.
    pub fn is_empty(&self) -> bool {
        self.line_signatures.is_empty()
    }

    pub(crate) fn add_origin(&mut self, stop_id: &str) {
        push_unique(&mut self.origin_stop_ids, stop_id);
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|s| s == id) {
        ids.push(id.to_string());
    }
}
