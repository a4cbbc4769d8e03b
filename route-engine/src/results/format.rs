//! Human-readable time labels.

use chrono::Duration;

/// Label for the distance between a departure and now.
///
/// Always unsigned: ten minutes ago and in ten minutes are both `10m`.
/// Returns `None` beyond `horizon`.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use route_engine::results::relative_label;
///
/// let horizon = Duration::hours(24);
/// assert_eq!(relative_label(Duration::minutes(-10), horizon).as_deref(), Some("10m"));
/// assert_eq!(relative_label(Duration::seconds(30), horizon).as_deref(), Some("now"));
/// assert_eq!(relative_label(Duration::minutes(135), horizon).as_deref(), Some("2h 15m"));
/// assert_eq!(relative_label(Duration::hours(25), horizon), None);
/// ```
pub fn relative_label(diff: Duration, horizon: Duration) -> Option<String> {
    let diff = diff.abs();
    if diff > horizon {
        return None;
    }
    if diff < Duration::minutes(1) {
        return Some("now".to_string());
    }
    Some(format_minutes(diff.num_minutes()))
}

/// Label for a trip length. `None` for negative durations.
pub fn duration_label(duration: Duration) -> Option<String> {
    if duration < Duration::zero() {
        return None;
    }
    Some(format_minutes(duration.num_minutes()))
}

fn format_minutes(total: i64) -> String {
    let hours = total / 60;
    let mins = total % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> Duration {
        Duration::hours(24)
    }

    #[test]
    fn minutes_only() {
        assert_eq!(relative_label(Duration::minutes(5), day()).unwrap(), "5m");
        assert_eq!(relative_label(Duration::minutes(-10), day()).unwrap(), "10m");
        assert_eq!(relative_label(Duration::seconds(119), day()).unwrap(), "1m");
    }

    #[test]
    fn hours_and_minutes() {
        assert_eq!(relative_label(Duration::minutes(60), day()).unwrap(), "1h");
        assert_eq!(relative_label(Duration::minutes(-61), day()).unwrap(), "1h 1m");
    }

    #[test]
    fn under_a_minute_is_now() {
        assert_eq!(relative_label(Duration::zero(), day()).unwrap(), "now");
        assert_eq!(relative_label(Duration::seconds(-59), day()).unwrap(), "now");
    }

    #[test]
    fn horizon_is_inclusive() {
        assert_eq!(relative_label(day(), day()).unwrap(), "24h");
        assert!(relative_label(day() + Duration::seconds(1), day()).is_none());
        assert!(relative_label(-day() - Duration::seconds(1), day()).is_none());
    }

    #[test]
    fn trip_lengths() {
        assert_eq!(duration_label(Duration::minutes(40)).unwrap(), "40m");
        assert_eq!(duration_label(Duration::minutes(75)).unwrap(), "1h 15m");
        assert_eq!(duration_label(Duration::zero()).unwrap(), "0m");
        assert!(duration_label(Duration::minutes(-5)).is_none());
    }
}
