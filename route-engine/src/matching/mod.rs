//! Line matching between an origin and a destination cluster.
//!
//! Turns a connection mapping into canonical (line, direction) matches and
//! packages them, with the clusters and query date, into a selection that
//! the results engine consumes.

mod aggregate;
mod route;
mod selection;

pub use aggregate::collect_matches;
pub use route::RouteMatcher;
pub use selection::{RouteLineMatch, RouteSearchSelection, create_selection};
