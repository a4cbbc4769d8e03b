//! Results engine configuration.

use chrono::Duration;
use chrono_tz::Tz;

/// Configuration for live timetable classification.
#[derive(Debug, Clone)]
pub struct ResultsConfig {
    /// How often to reclassify the timetable (milliseconds).
    pub refresh_interval_ms: u64,

    /// How long a departure stays listed after it left (minutes).
    /// Only applies when browsing today.
    pub past_window_mins: i64,

    /// Span of the progress indicators either side of a departure (minutes).
    pub progress_window_mins: i64,

    /// Relative labels are suppressed beyond this distance (hours).
    pub label_horizon_hours: i64,

    /// Zone used to decide which calendar day an instant falls on.
    pub timezone: Tz,
}

impl ResultsConfig {
    /// Set the refresh interval.
    pub fn with_refresh_interval_ms(mut self, ms: u64) -> Self {
        self.refresh_interval_ms = ms;
        self
    }

    /// Set the timezone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the past window.
    pub fn with_past_window_mins(mut self, mins: i64) -> Self {
        self.past_window_mins = mins;
        self
    }

    /// Set the progress window.
    pub fn with_progress_window_mins(mut self, mins: i64) -> Self {
        self.progress_window_mins = mins;
        self
    }

    /// Returns the refresh interval, never shorter than a millisecond.
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    /// Returns the past window as a Duration.
    pub fn past_window(&self) -> Duration {
        Duration::minutes(self.past_window_mins)
    }

    /// Returns the progress window as a Duration.
    pub fn progress_window(&self) -> Duration {
        Duration::minutes(self.progress_window_mins)
    }

    /// Returns the label horizon as a Duration.
    pub fn label_horizon(&self) -> Duration {
        Duration::hours(self.label_horizon_hours)
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 1000,
            past_window_mins: 30,
            progress_window_mins: 30,
            label_horizon_hours: 24,
            timezone: chrono_tz::Europe::Madrid,
        }
    }
}
