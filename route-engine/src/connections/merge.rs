//! Merging connection mappings.

use crate::domain::Connections;

/// Combine several connection mappings into one.
///
/// For a stop present in more than one input, origin stop ids are the
/// ordered union (earlier inputs first) and line signatures are the set
/// union. Inputs are left untouched.
pub fn merge_connections<'a, I>(maps: I) -> Connections
where
    I: IntoIterator<Item = &'a Connections>,
{
    let mut merged = Connections::new();

    for map in maps {
        for (key, connection) in map {
            let combined = match merged.get(key) {
                Some(existing) => existing.merged_with(connection),
                None => connection.clone(),
            };
            merged.insert(key.clone(), combined);
        }
    }

    merged
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{LineSignature, StopConnection};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    prop_compose! {
        fn arb_connection()(
            stop in 0u8..6,
            lines in proptest::collection::vec(
                (0u8..4, 0u8..3, proptest::collection::vec(0u8..5, 1..4)),
                1..4,
            ),
        ) -> StopConnection {
            let mut c = StopConnection::new(1, format!("d{stop}"));
            for (id, dir, origins) in lines {
                let signature = LineSignature::new(id.to_string(), "X", dir);
                for o in origins {
                    c.add_line(&signature, &format!("o{o}"));
                }
            }
            c
        }
    }

    fn arb_map() -> impl Strategy<Value = Connections> {
        proptest::collection::vec(arb_connection(), 0..6)
            .prop_map(|cs| cs.into_iter().map(|c| (c.key(), c)).collect())
    }

    /// Compare maps ignoring origin order.
    fn as_sets(map: &Connections) -> Vec<(String, BTreeSet<String>, BTreeSet<LineSignature>)> {
        let mut out: Vec<_> = map
            .iter()
            .map(|(k, c)| {
                (
                    k.to_string(),
                    c.origin_stop_ids.iter().cloned().collect(),
                    c.line_signatures.clone(),
                )
            })
            .collect();
        out.sort();
        out
    }

    proptest! {
        /// Merge order only affects origin order, never membership.
        #[test]
        fn merge_is_commutative_up_to_order(a in arb_map(), b in arb_map()) {
            let ab = merge_connections([&a, &b]);
            let ba = merge_connections([&b, &a]);
            prop_assert_eq!(as_sets(&ab), as_sets(&ba));
        }

        /// Merging a map with itself changes nothing.
        #[test]
        fn merge_is_idempotent(a in arb_map()) {
            prop_assert_eq!(merge_connections([&a, &a]), a.clone());
        }

        /// Grouping does not matter.
        #[test]
        fn merge_is_associative(a in arb_map(), b in arb_map(), c in arb_map()) {
            let left = merge_connections([&merge_connections([&a, &b]), &c]);
            let right = merge_connections([&a, &merge_connections([&b, &c])]);
            prop_assert_eq!(left, right);
        }

        /// Every per-line origin is also an origin of the merged stop.
        #[test]
        fn merged_line_origins_are_stop_origins(a in arb_map(), b in arb_map()) {
            for c in merge_connections([&a, &b]).values() {
                for signature in &c.line_signatures {
                    let via = c.origins_via(signature);
                    prop_assert!(!via.is_empty());
                    prop_assert!(via.iter().all(|id| c.origin_stop_ids.contains(id)));
                }
            }
        }

        /// Origin ids never repeat within a merged connection.
        #[test]
        fn merged_origins_are_unique(a in arb_map(), b in arb_map()) {
            for c in merge_connections([&a, &b]).values() {
                let unique: BTreeSet<_> = c.origin_stop_ids.iter().collect();
                prop_assert_eq!(unique.len(), c.origin_stop_ids.len());
            }
        }
    }
}
