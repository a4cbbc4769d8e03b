use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use route_engine::connections::ConnectionFinder;
use route_engine::dataset::{ClusterDirectory, InMemoryClusterDirectory, InMemoryDataset};
use route_engine::matching::RouteMatcher;
use route_engine::results::{ResultsConfig, ResultsEngine, SystemClock};
use route_engine::timetable::FileTimetableProvider;

const USAGE: &str = "usage: route-engine <origin-cluster> <destination-cluster> [YYYY-MM-DD]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(origin_arg), Some(destination_arg)) = (args.next(), args.next()) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let date_arg = args.next();

    // Configuration from environment
    let data_dir = PathBuf::from(std::env::var("ROUTE_DATA_DIR").unwrap_or_else(|_| {
        warn!("ROUTE_DATA_DIR not set, using ./data");
        "data".to_string()
    }));
    let mut config = ResultsConfig::default();
    if let Ok(tz) = std::env::var("ROUTE_TZ") {
        let tz: Tz = tz.parse().expect("ROUTE_TZ must be an IANA timezone name");
        config = config.with_timezone(tz);
    }
    if let Ok(ms) = std::env::var("ROUTE_REFRESH_MS") {
        let ms: u64 = ms.parse().expect("ROUTE_REFRESH_MS must be a whole number");
        config = config.with_refresh_interval_ms(ms);
    }

    // Load the dataset, cluster directory and timetables
    let dataset = InMemoryDataset::load(data_dir.join("stops.json")).expect("Failed to load stops");
    let clusters = InMemoryClusterDirectory::load(data_dir.join("clusters.json"))
        .expect("Failed to load clusters");
    let provider = FileTimetableProvider::new(data_dir.join("timetables"), config.timezone)
        .expect("Failed to load timetables");
    info!(stops = dataset.len(), clusters = clusters.len(), "loaded dataset");

    let origin = clusters
        .resolve(&origin_arg)
        .unwrap_or_else(|| panic!("unknown origin cluster {origin_arg}"));
    let destination = clusters
        .resolve(&destination_arg)
        .unwrap_or_else(|| panic!("unknown destination cluster {destination_arg}"));

    let query_date = match date_arg {
        Some(s) => {
            let day = NaiveDate::parse_from_str(&s, "%Y-%m-%d").expect("date must be YYYY-MM-DD");
            config
                .timezone
                .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
                .earliest()
                .expect("noon exists on every day")
                .with_timezone(&Utc)
        }
        None => Utc::now(),
    };

    // Match lines between the two clusters
    let finder = Arc::new(ConnectionFinder::new(Arc::new(dataset)));
    let matcher = RouteMatcher::new(finder);
    let selection = matcher.select(origin, destination, query_date).await;
    for m in selection.line_matches() {
        info!(
            line = %m.line_code,
            direction = m.direction,
            origins = ?m.origin_stop_ids,
            destinations = ?m.destination_stop_ids,
            "line match"
        );
    }

    // Follow live results until the stream ends
    let engine = ResultsEngine::new(Arc::new(provider), Arc::new(SystemClock), config);
    let mut results = engine.load_results(selection);
    while let Some(update) = results.next().await {
        match update {
            Ok(model) => match serde_json::to_string(&model) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("failed to serialize results: {e}"),
            },
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        }
    }
}
