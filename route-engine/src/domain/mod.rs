//! Domain types for the route-matching engine.
//!
//! Everything here is plain value data: signatures used as lookup keys,
//! stop clusters, connection records and timetable entries. None of these
//! types are mutated after construction; an "update" builds a new value.

mod cluster;
mod connection;
mod signature;
mod timetable;

pub use cluster::StopCluster;
pub use connection::{Connections, StopConnection};
pub use signature::{Direction, LineSignature, StopKey, StopSignature};
pub use timetable::TimetableEntry;
