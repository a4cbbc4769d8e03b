//! Stop and line signatures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one physical stop within one transit authority.
///
/// Ordering is by consortium first, then stop id, so a sorted list of
/// signatures is stable regardless of the order callers supplied them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSignature {
    pub consortium_id: u32,
    pub stop_id: String,
}

impl StopSignature {
    /// Create a new stop signature.
    pub fn new(consortium_id: u32, stop_id: impl Into<String>) -> Self {
        Self {
            consortium_id,
            stop_id: stop_id.into(),
        }
    }

    /// The map key for this stop.
    pub fn key(&self) -> StopKey {
        StopKey::new(self.consortium_id, &self.stop_id)
    }
}

/// A line travelling in one direction.
///
/// Two signatures are equal iff line id, line code and direction all match.
///
/// # Examples
///
/// ```
/// use route_engine::domain::LineSignature;
///
/// let outbound = LineSignature::new("L1", "M-110", 1);
/// let inbound = LineSignature::new("L1", "M-110", 2);
/// assert_ne!(outbound, inbound);
/// assert_eq!(outbound.key(), "L1|M-110|1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSignature {
    pub line_id: String,
    pub line_code: String,
    pub direction: u8,
}

impl LineSignature {
    /// Create a new line signature.
    pub fn new(line_id: impl Into<String>, line_code: impl Into<String>, direction: u8) -> Self {
        Self {
            line_id: line_id.into(),
            line_code: line_code.into(),
            direction,
        }
    }

    /// Compact string identity, `lineId|lineCode|direction`.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.line_id, self.line_code, self.direction)
    }
}

impl fmt::Display for LineSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) dir {}", self.line_code, self.line_id, self.direction)
    }
}

/// Key of a stop in a connection mapping: `consortiumId|stopId`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopKey(String);

impl StopKey {
    /// Build the key for a stop.
    pub fn new(consortium_id: u32, stop_id: &str) -> Self {
        StopKey(format!("{consortium_id}|{stop_id}"))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopKey({})", self.0)
    }
}

impl fmt::Display for StopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which way along a line the connection search walks from the origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stops served after the origin on the line.
    Forward,
    /// Stops served before the origin on the line.
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn stop_key_format() {
        let sig = StopSignature::new(7, "149");
        assert_eq!(sig.key().as_str(), "7|149");
        assert_eq!(format!("{:?}", sig.key()), "StopKey(7|149)");
    }

    #[test]
    fn stop_signature_ordering() {
        let mut sigs = vec![
            StopSignature::new(2, "a"),
            StopSignature::new(1, "z"),
            StopSignature::new(1, "b"),
        ];
        sigs.sort();
        assert_eq!(
            sigs,
            vec![
                StopSignature::new(1, "b"),
                StopSignature::new(1, "z"),
                StopSignature::new(2, "a"),
            ]
        );
    }

    #[test]
    fn line_signature_equality_needs_all_fields() {
        let a = LineSignature::new("L1", "M-110", 1);
        assert_eq!(a, LineSignature::new("L1", "M-110", 1));
        assert_ne!(a, LineSignature::new("L2", "M-110", 1));
        assert_ne!(a, LineSignature::new("L1", "M-111", 1));
        assert_ne!(a, LineSignature::new("L1", "M-110", 2));
    }

    #[test]
    fn line_signature_hash_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(LineSignature::new("L1", "M-110", 1));
        assert!(set.contains(&LineSignature::new("L1", "M-110", 1)));
        assert!(!set.contains(&LineSignature::new("L1", "M-110", 0)));
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&StopSignature::new(3, "12")).unwrap();
        assert_eq!(json, r#"{"consortiumId":3,"stopId":"12"}"#);

        let sig: LineSignature =
            serde_json::from_str(r#"{"lineId":"9","lineCode":"M-1","direction":2}"#).unwrap();
        assert_eq!(sig, LineSignature::new("9", "M-1", 2));
    }
}
