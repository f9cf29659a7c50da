//! Saved itineraries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{RouteOption, TransportMode, UserId};

/// A saved itinerary before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHistoryRecord {
    pub user_id: UserId,
    pub source: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub modes: Vec<TransportMode>,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<i64>,
    pub estimated_cost: Option<f64>,

    /// The option the user picked, kept verbatim.
    #[serde(rename = "itinerary_json")]
    pub itinerary: Option<RouteOption>,
}

/// A stored itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: u64,

    #[serde(flatten)]
    pub entry: NewHistoryRecord,

    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn belongs_to(&self, user: UserId) -> bool {
        self.entry.user_id == user
    }
}
