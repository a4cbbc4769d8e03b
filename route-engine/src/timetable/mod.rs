//! Timetable provider boundary.
//!
//! The engine fetches one timetable per selection through
//! [`TimetableProvider`]. A file-backed provider serves pre-exported
//! timetables for development and tests.

mod error;
mod file;
mod provider;

pub use error::ProviderError;
pub use file::FileTimetableProvider;
pub use provider::{TimetableProvider, TimetableRequest};
