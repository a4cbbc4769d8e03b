//! Timetable provider trait and request shape.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TimetableEntry;
use crate::matching::RouteSearchSelection;

use super::error::ProviderError;

/// What the timetable provider needs to answer a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRequest {
    pub consortium_id: u32,
    pub origin_nucleus_id: String,
    pub destination_nucleus_id: String,
    pub query_date: DateTime<Utc>,
}

impl TimetableRequest {
    /// Derive the request for a selection.
    pub fn for_selection(selection: &RouteSearchSelection) -> Self {
        Self {
            consortium_id: selection.origin().consortium_id,
            origin_nucleus_id: selection.origin().nucleus_id.clone(),
            destination_nucleus_id: selection.destination().nucleus_id.clone(),
            query_date: selection.query_date(),
        }
    }
}

/// Source of timetables.
///
/// This abstraction allows the results engine to be tested with mock data.
pub trait TimetableProvider: Send + Sync {
    /// Load every scheduled trip for the request's nuclei and day.
    fn load_timetable(
        &self,
        request: &TimetableRequest,
    ) -> impl Future<Output = Result<Vec<TimetableEntry>, ProviderError>> + Send;
}
