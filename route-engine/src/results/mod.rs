//! Live timetable classification.
//!
//! The results engine fetches a timetable once per selection, then on a
//! fixed cadence reclassifies every entry into past and upcoming departures
//! against the clock. Each tick produces a fresh view model; nothing from a
//! previous tick is mutated.

mod classify;
mod clock;
mod config;
mod engine;
mod format;


pub use classify::{
    DayRelation, DepartureKind, DepartureView, ReferenceContext, ResultsViewModel, classify,
    past_progress, reference_context, upcoming_progress,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ResultsConfig;
pub use engine::{ResultsController, ResultsEngine, ResultsError, ResultsSubscription, ResultsUpdate};
pub use format::{duration_label, relative_label};
