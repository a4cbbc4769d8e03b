//! End-to-end: clusters -> line matches -> live results, over the demo data.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use route_engine::connections::ConnectionFinder;
use route_engine::dataset::{
    ClusterDirectory, InMemoryClusterDirectory, InMemoryDataset, StopDataset,
};
use route_engine::domain::{StopSignature, TimetableEntry};
use route_engine::matching::RouteMatcher;
use route_engine::results::{
    DepartureKind, ManualClock, ResultsConfig, ResultsEngine, classify,
};
use route_engine::timetable::FileTimetableProvider;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[tokio::test(start_paused = true)]
async fn demo_data_end_to_end() {
    let config = ResultsConfig::default();
    let dataset = InMemoryDataset::load(data_dir().join("stops.json")).unwrap();
    let clusters = InMemoryClusterDirectory::load(data_dir().join("clusters.json")).unwrap();
    let provider =
        FileTimetableProvider::new(data_dir().join("timetables"), config.timezone).unwrap();

    let origin = clusters.resolve("estacion-autobuses").unwrap();
    let destination = clusters.resolve("centro").unwrap();

    let matcher = RouteMatcher::new(Arc::new(ConnectionFinder::new(Arc::new(dataset))));
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 10, 0).unwrap();
    let selection = matcher.select(origin, destination, now).await;

    let mut lines: Vec<(String, u8)> = selection
        .line_matches()
        .iter()
        .map(|m| (m.line_id.clone(), m.direction))
        .collect();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            ("55".to_string(), 1),
            ("55".to_string(), 2),
            ("61".to_string(), 1)
        ]
    );

    // 340 is fed from both 101 and 102, but only 102 boards line 61.
    let m120 = selection.match_for("61", Some(1)).unwrap();
    assert_eq!(m120.origin_stop_ids, vec!["102"]);
    assert_eq!(m120.destination_stop_ids, vec!["340", "341"]);
    let m110 = selection.match_for("55", Some(1)).unwrap();
    assert_eq!(m110.origin_stop_ids, vec!["101"]);

    let engine = ResultsEngine::new(
        Arc::new(provider),
        Arc::new(ManualClock::new(now)),
        config,
    );
    let mut results = engine.load_results(selection);
    let model = results.next().await.unwrap().unwrap();

    // 06:45 and 07:30 are outside the past window; 09:00 just left.
    assert_eq!(model.departures.len(), 2);
    let recent = model.most_recent_past().unwrap();
    assert_eq!(recent.kind, DepartureKind::Past);
    assert_eq!(recent.relative_label.as_deref(), Some("10m"));
    assert_eq!(recent.frequency_label, "Diario");

    let next = model.next().unwrap();
    assert!(next.is_holiday_service);
    assert_eq!(next.travel_duration_label.as_deref(), Some("35m"));
    assert_eq!(next.destination, "Dos Hermanas Centro");
}

#[tokio::test]
async fn entries_without_direction_or_origin_use_serving_stops() {
    let config = ResultsConfig::default();
    let dataset = Arc::new(InMemoryDataset::load(data_dir().join("stops.json")).unwrap());
    let clusters = InMemoryClusterDirectory::load(data_dir().join("clusters.json")).unwrap();
    let origin = clusters.resolve("estacion").unwrap();
    let destination = clusters.resolve("centro").unwrap();

    let matcher = RouteMatcher::new(Arc::new(ConnectionFinder::new(dataset.clone())));
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 10, 0).unwrap();
    let selection = matcher.select(origin, destination, now).await;

    // Line 55 is matched in both directions; bare entries attach to the
    // first match for the line.
    let first_55 = selection.match_for("55", None).unwrap();
    assert_eq!(first_55.direction, 1);

    let entries = vec![
        TimetableEntry::new("55", "M-110", now + Duration::minutes(5), now + Duration::minutes(40)),
        TimetableEntry::new("61", "M-120", now + Duration::minutes(8), now + Duration::minutes(50)),
    ];
    let model = classify(&selection, &entries, now, &config);
    assert_eq!(model.departures.len(), 2);

    let m110 = &model.departures[0];
    assert_eq!(m110.line_id, "55");
    assert_eq!(m110.direction, 1);
    assert_eq!(m110.origin_stop_id, "101");

    let m120 = &model.departures[1];
    assert_eq!(m120.line_id, "61");
    assert_eq!(m120.direction, 1);
    assert_eq!(m120.origin_stop_id, "102");
    assert!(m120.id.starts_with("61:1:102:"));

    for departure in &model.departures {
        let stop = dataset
            .stop(&StopSignature::new(7, departure.origin_stop_id.clone()))
            .unwrap();
        assert!(
            stop.lines.iter().any(|l| l.signature.line_id == departure.line_id
                && l.signature.direction == departure.direction),
            "{} does not serve line {}",
            departure.origin_stop_id,
            departure.line_id
        );
    }
}
