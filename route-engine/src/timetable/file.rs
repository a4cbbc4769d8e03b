//! File-backed timetable provider.
//!
//! Loads timetables from JSON files named `{originNucleus}-{destinationNucleus}.json`
//! and serves them as if they were live responses, keeping only the entries
//! that depart on the requested calendar day.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono_tz::Tz;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::TimetableEntry;

use super::error::ProviderError;
use super::provider::{TimetableProvider, TimetableRequest};

type NucleusPair = (String, String);

/// Timetable provider that serves data from JSON files.
#[derive(Clone)]
pub struct FileTimetableProvider {
    timetables: Arc<RwLock<HashMap<NucleusPair, Vec<TimetableEntry>>>>,
    timezone: Tz,
}

impl FileTimetableProvider {
    /// Load every `*.json` timetable in `data_dir`.
    ///
    /// `timezone` decides which calendar day an entry belongs to.
    pub fn new(data_dir: impl AsRef<Path>, timezone: Tz) -> Result<Self, ProviderError> {
        let timetables = load_dir(data_dir.as_ref())?;
        Ok(Self {
            timetables: Arc::new(RwLock::new(timetables)),
            timezone,
        })
    }

    /// Nucleus pairs with a timetable on disk.
    pub async fn available_pairs(&self) -> Vec<(String, String)> {
        let timetables = self.timetables.read().await;
        timetables.keys().cloned().collect()
    }

    /// Reload timetables from disk.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), ProviderError> {
        let fresh = load_dir(data_dir.as_ref())?;
        let mut timetables = self.timetables.write().await;
        *timetables = fresh;
        Ok(())
    }
}

impl TimetableProvider for FileTimetableProvider {
    async fn load_timetable(
        &self,
        request: &TimetableRequest,
    ) -> Result<Vec<TimetableEntry>, ProviderError> {
        let timetables = self.timetables.read().await;
        let key = (
            request.origin_nucleus_id.clone(),
            request.destination_nucleus_id.clone(),
        );

        let entries = timetables
            .get(&key)
            .ok_or_else(|| ProviderError::NotFound {
                origin: request.origin_nucleus_id.clone(),
                destination: request.destination_nucleus_id.clone(),
            })?;

        let day = request.query_date.with_timezone(&self.timezone).date_naive();
        let for_day: Vec<TimetableEntry> = entries
            .iter()
            .filter(|e| e.departure_time.with_timezone(&self.timezone).date_naive() == day)
            .cloned()
            .collect();

        debug!(
            origin = %request.origin_nucleus_id,
            destination = %request.destination_nucleus_id,
            %day,
            entries = for_day.len(),
            "served timetable from file"
        );
        Ok(for_day)
    }
}

fn load_dir(data_dir: &Path) -> Result<HashMap<NucleusPair, Vec<TimetableEntry>>, ProviderError> {
    let io_err = |source: std::io::Error| ProviderError::Io {
        path: data_dir.to_path_buf(),
        source,
    };

    let mut timetables = HashMap::new();
    for entry in std::fs::read_dir(data_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        // "12-40.json" -> ("12", "40")
        let Some((origin, destination)) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|stem| stem.split_once('-'))
        else {
            debug!(?path, "skipping timetable file without a nucleus pair name");
            continue;
        };

        let json = std::fs::read_to_string(&path).map_err(|source| ProviderError::Io {
            path: path.clone(),
            source,
        })?;
        let entries: Vec<TimetableEntry> =
            serde_json::from_str(&json).map_err(|source| ProviderError::Json {
                path: path.clone(),
                source,
            })?;

        timetables.insert((origin.to_string(), destination.to_string()), entries);
    }

    Ok(timetables)
}
