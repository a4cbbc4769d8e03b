//! Connection discovery between stops.
//!
//! The finder answers "which stops can be reached from these origin stops,
//! and on which lines?" for one traversal direction, memoizing each distinct
//! origin set. The merger combines forward and backward results for
//! bidirectional reachability.

mod finder;
mod merge;

pub use finder::ConnectionFinder;
pub use merge::merge_connections;
