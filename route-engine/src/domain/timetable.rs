//! Timetable entries as served by the timetable provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled trip between the selected origin and destination.
///
/// Fetched, not owned: the engine never validates entries. `direction`,
/// `origin_stop_id` and `destination` are optional; when missing the
/// engine derives them from the matching line match and selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub line_id: String,
    pub line_code: String,
    #[serde(default)]
    pub direction: Option<u8>,
    #[serde(default)]
    pub origin_stop_id: Option<String>,
    /// Headsign shown to riders.
    #[serde(default)]
    pub destination: Option<String>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub frequency_label: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_holiday_only: bool,
}

impl TimetableEntry {
    /// Create an entry with just the required fields.
    pub fn new(
        line_id: impl Into<String>,
        line_code: impl Into<String>,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
    ) -> Self {
        Self {
            line_id: line_id.into(),
            line_code: line_code.into(),
            direction: None,
            origin_stop_id: None,
            destination: None,
            departure_time,
            arrival_time,
            frequency_label: String::new(),
            notes: None,
            is_holiday_only: false,
        }
    }
}
