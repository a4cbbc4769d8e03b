//! Aggregating connections into line matches.

use std::collections::HashMap;

use crate::domain::{Connections, LineSignature, StopCluster, StopKey};

use super::selection::RouteLineMatch;

/// Matches accumulated for one (line, code, direction) triple.
struct Aggregate<'a> {
    signature: &'a LineSignature,
    origin_stop_ids: Vec<&'a String>,
    destination_stop_ids: Vec<&'a String>,
}

/// Collect the lines that connect `origin` to `destination`.
///
/// Each match lists only the origin stops that reach the destination on
/// that line, not every origin feeding the destination stop.
///
/// Matches come out in the order their line signature is first seen while
/// walking the destination stops. Callers that need a particular order must
/// sort.
pub fn collect_matches(
    origin: &StopCluster,
    destination: &StopCluster,
    connections: &Connections,
) -> Vec<RouteLineMatch> {
    let mut aggregates: Vec<Aggregate<'_>> = Vec::new();
    let mut index: HashMap<&LineSignature, usize> = HashMap::new();

    for destination_id in &destination.stop_ids {
        let key = StopKey::new(destination.consortium_id, destination_id);
        let Some(connection) = connections.get(&key) else {
            continue;
        };

        if !connection.origin_stop_ids.iter().any(|id| origin.contains(id)) {
            continue;
        }

        for signature in &connection.line_signatures {
            // Only the origins that actually board this line.
            let from_origin: Vec<&String> = connection
                .origins_via(signature)
                .iter()
                .filter(|id| origin.contains(id))
                .collect();
            if from_origin.is_empty() {
                continue;
            }

            let idx = *index.entry(signature).or_insert_with(|| {
                aggregates.push(Aggregate {
                    signature,
                    origin_stop_ids: Vec::new(),
                    destination_stop_ids: Vec::new(),
                });
                aggregates.len() - 1
            });
            let aggregate = &mut aggregates[idx];
            aggregate.origin_stop_ids.extend(from_origin.iter().copied());
            aggregate.destination_stop_ids.push(destination_id);
        }
    }

    aggregates
        .into_iter()
        .map(|aggregate| RouteLineMatch {
            line_id: aggregate.signature.line_id.clone(),
            line_code: aggregate.signature.line_code.clone(),
            direction: aggregate.signature.direction,
            origin_stop_ids: origin.order_ids(aggregate.origin_stop_ids),
            destination_stop_ids: destination.order_ids(aggregate.destination_stop_ids),
        })
        .collect()
}
