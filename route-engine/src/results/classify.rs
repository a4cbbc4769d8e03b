//! Classifying a timetable against the clock.
//!
//! Pure functions: given a selection, the fetched entries and the current
//! instant, build the view model for one tick.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::TimetableEntry;
use crate::matching::{RouteLineMatch, RouteSearchSelection};

use super::config::ResultsConfig;
use super::format::{duration_label, relative_label};

/// How the query day relates to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayRelation {
    Past,
    Today,
    Future,
}

/// The instant departures are judged against, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceContext {
    pub relation: DayRelation,
    /// `actual_now` for today, otherwise the start of the query day.
    pub reference: DateTime<Utc>,
    pub actual_now: DateTime<Utc>,
}

/// Compare the query day with today in `timezone`.
pub fn reference_context(
    query_date: DateTime<Utc>,
    actual_now: DateTime<Utc>,
    timezone: Tz,
) -> ReferenceContext {
    let query_day = query_date.with_timezone(&timezone).date_naive();
    let today = actual_now.with_timezone(&timezone).date_naive();

    let (relation, reference) = match query_day.cmp(&today) {
        Ordering::Equal => (DayRelation::Today, actual_now),
        Ordering::Less => (DayRelation::Past, start_of_day(query_day, timezone)),
        Ordering::Greater => (DayRelation::Future, start_of_day(query_day, timezone)),
    };

    ReferenceContext {
        relation,
        reference,
        actual_now,
    }
}

/// First instant of `day` in `timezone`.
///
/// Where a DST jump skips midnight, this is the first whole hour of the day
/// that exists locally.
fn start_of_day(day: NaiveDate, timezone: Tz) -> DateTime<Utc> {
    (0..24)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .find_map(|time| timezone.from_local_datetime(&day.and_time(time)).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| day.and_time(NaiveTime::MIN).and_utc())
}

/// Whether a departure has left, as judged at the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartureKind {
    Past,
    Upcoming,
}

/// One row of the results view. Rebuilt on every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureView {
    pub id: String,
    pub line_id: String,
    pub line_code: String,
    pub direction: u8,
    pub destination: String,
    pub origin_stop_id: String,
    /// When the vehicle reaches the origin stop.
    pub arrival_time: DateTime<Utc>,
    pub relative_label: Option<String>,
    /// Seconds from the real clock to departure; negative once gone.
    pub wait_time_seconds: i64,
    pub kind: DepartureKind,
    pub is_next: bool,
    pub is_most_recent_past: bool,
    pub is_holiday_service: bool,
    pub frequency_label: String,
    pub show_upcoming_progress: bool,
    pub progress_percentage: f64,
    pub past_progress_percentage: f64,
    pub destination_arrival_time: Option<DateTime<Utc>>,
    pub travel_duration_label: Option<String>,
}

/// What the presentation layer renders for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsViewModel {
    pub departures: Vec<DepartureView>,
    pub has_upcoming: bool,
    pub next_departure_id: Option<String>,
}

impl ResultsViewModel {
    /// A view with no departures.
    pub fn empty() -> Self {
        Self {
            departures: Vec::new(),
            has_upcoming: false,
            next_departure_id: None,
        }
    }

    /// The departure flagged as next, if any.
    pub fn next(&self) -> Option<&DepartureView> {
        self.departures.iter().find(|d| d.is_next)
    }

    /// The departure flagged as most recently gone, if any.
    pub fn most_recent_past(&self) -> Option<&DepartureView> {
        self.departures.iter().find(|d| d.is_most_recent_past)
    }
}

/// Progress towards an upcoming departure: 0 at `window` or more away,
/// 100 at departure.
pub fn upcoming_progress(seconds_until: i64, window_seconds: i64) -> f64 {
    if window_seconds <= 0 {
        return if seconds_until <= 0 { 100.0 } else { 0.0 };
    }
    let fraction = 1.0 - seconds_until as f64 / window_seconds as f64;
    (fraction * 100.0).clamp(0.0, 100.0)
}

/// Progress since a departure: 0 at departure, 100 at `window` after.
pub fn past_progress(seconds_since: i64, window_seconds: i64) -> f64 {
    if window_seconds <= 0 {
        return if seconds_since >= 0 { 100.0 } else { 0.0 };
    }
    let fraction = seconds_since as f64 / window_seconds as f64;
    (fraction * 100.0).clamp(0.0, 100.0)
}

/// A departure plus the data needed to deduplicate and order it.
struct Candidate {
    view: DepartureView,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    priority: usize,
}

impl Candidate {
    /// Same line, direction and minute-slot at both ends.
    fn slot(&self) -> (String, u8, i64, i64) {
        (
            self.view.line_id.clone(),
            self.view.direction,
            self.departure.timestamp().div_euclid(60),
            self.arrival.timestamp().div_euclid(60),
        )
    }

    /// Whether this candidate should replace `other` in the same slot.
    fn beats(&self, other: &Candidate) -> bool {
        (self.priority, self.arrival) < (other.priority, other.arrival)
    }
}

/// Build the view model for one tick.
pub fn classify(
    selection: &RouteSearchSelection,
    entries: &[TimetableEntry],
    actual_now: DateTime<Utc>,
    config: &ResultsConfig,
) -> ResultsViewModel {
    if selection.is_empty() {
        return ResultsViewModel::empty();
    }

    let context = reference_context(selection.query_date(), actual_now, config.timezone);

    let candidates: Vec<Candidate> = entries
        .iter()
        .filter_map(|entry| {
            let line_match = selection.match_for(&entry.line_id, entry.direction)?;
            build_candidate(selection, line_match, entry, &context, config)
        })
        .collect();

    let mut departures = deduplicate(candidates);
    departures.sort_by(|a, b| {
        a.departure
            .cmp(&b.departure)
            .then(a.arrival.cmp(&b.arrival))
            .then_with(|| a.view.line_code.cmp(&b.view.line_code))
            .then_with(|| a.view.id.cmp(&b.view.id))
    });

    let mut departures: Vec<DepartureView> = departures.into_iter().map(|c| c.view).collect();

    let next_idx = departures
        .iter()
        .position(|d| d.kind == DepartureKind::Upcoming);
    let recent_idx = match next_idx {
        Some(idx) => idx.checked_sub(1),
        None => departures.len().checked_sub(1),
    };

    if let Some(idx) = next_idx {
        departures[idx].is_next = true;
    }
    if let Some(idx) = recent_idx {
        departures[idx].is_most_recent_past = true;
    }

    ResultsViewModel {
        next_departure_id: next_idx.map(|idx| departures[idx].id.clone()),
        has_upcoming: next_idx.is_some(),
        departures,
    }
}

fn build_candidate(
    selection: &RouteSearchSelection,
    line_match: &RouteLineMatch,
    entry: &TimetableEntry,
    context: &ReferenceContext,
    config: &ResultsConfig,
) -> Option<Candidate> {
    let departure = entry.departure_time;

    let kind = match context.relation {
        DayRelation::Past => DepartureKind::Past,
        DayRelation::Future => DepartureKind::Upcoming,
        DayRelation::Today if departure >= context.reference => DepartureKind::Upcoming,
        DayRelation::Today => DepartureKind::Past,
    };

    let until = departure - context.actual_now;
    if context.relation == DayRelation::Today
        && kind == DepartureKind::Past
        && -until > config.past_window()
    {
        return None;
    }

    let window = config.progress_window().num_seconds();
    let seconds_until = until.num_seconds();
    let (progress, past, show_progress) = match kind {
        DepartureKind::Upcoming => (
            upcoming_progress(seconds_until, window),
            0.0,
            (0..=window).contains(&seconds_until),
        ),
        DepartureKind::Past => (0.0, past_progress(-seconds_until, window), false),
    };

    let origin_stop_id = entry
        .origin_stop_id
        .clone()
        .or_else(|| line_match.origin_stop_ids.first().cloned())
        .unwrap_or_default();
    let priority = line_match
        .origin_priority(&origin_stop_id)
        .unwrap_or(usize::MAX);

    let headsign = entry
        .destination
        .clone()
        .unwrap_or_else(|| selection.destination().name.clone());
    let destination = match entry.notes.as_deref().map(str::trim) {
        Some(notes) if !notes.is_empty() => format!("{headsign} • {notes}"),
        _ => headsign,
    };

    let travel = entry.arrival_time - departure;
    let consistent = travel >= chrono::Duration::zero();

    let view = DepartureView {
        id: format!(
            "{}:{}:{}:{}",
            line_match.line_id,
            line_match.direction,
            origin_stop_id,
            departure.timestamp()
        ),
        line_id: line_match.line_id.clone(),
        line_code: entry.line_code.clone(),
        direction: line_match.direction,
        destination,
        origin_stop_id,
        arrival_time: departure,
        relative_label: relative_label(until, config.label_horizon()),
        wait_time_seconds: seconds_until,
        kind,
        is_next: false,
        is_most_recent_past: false,
        is_holiday_service: entry.is_holiday_only,
        frequency_label: entry.frequency_label.clone(),
        show_upcoming_progress: show_progress,
        progress_percentage: progress,
        past_progress_percentage: past,
        destination_arrival_time: consistent.then_some(entry.arrival_time),
        travel_duration_label: duration_label(travel),
    };

    Some(Candidate {
        view,
        departure,
        arrival: entry.arrival_time,
        priority,
    })
}

/// Keep one candidate per slot, preferring the best-placed origin stop.
fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    let mut slots: HashMap<(String, u8, i64, i64), usize> = HashMap::new();

    for candidate in candidates {
        match slots.get(&candidate.slot()) {
            Some(&idx) => {
                if candidate.beats(&kept[idx]) {
                    kept[idx] = candidate;
                }
            }
            None => {
                slots.insert(candidate.slot(), kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}
