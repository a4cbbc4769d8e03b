//! Route matching and live timetable engine.
//!
//! Given two stop clusters, discovers the transit lines joining them and
//! keeps a fetched timetable continuously classified into past and
//! upcoming departures.

pub mod connections;
pub mod dataset;
pub mod domain;
pub mod matching;
pub mod results;
pub mod timetable;
