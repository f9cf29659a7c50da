//! Data transfer objects for web requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{HistoryRecord, PreferenceOverride, RouteOption, ScoredOption};
use crate::planner::{PlanRequest, SaveItinerary, TravelPlan};

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTravelRequest {
    /// Origin city name
    #[serde(default)]
    pub source: Option<String>,

    /// Destination city name
    #[serde(default)]
    pub destination: Option<String>,

    /// Travel date (YYYY-MM-DD)
    #[serde(default, deserialize_with = "optional_date")]
    pub start_date: Option<NaiveDate>,

    /// Return date (YYYY-MM-DD)
    #[serde(default, deserialize_with = "optional_date")]
    pub end_date: Option<NaiveDate>,

    /// Preference values for this request only
    #[serde(default)]
    pub preferences: Option<PreferenceOverride>,
}

impl From<PlanTravelRequest> for PlanRequest {
    fn from(req: PlanTravelRequest) -> Self {
        Self {
            source: req.source.unwrap_or_default(),
            destination: req.destination.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            preferences: req.preferences,
        }
    }
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct PlanTravelResponse {
    pub source: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Resolved distance between the cities
    pub distance_km: f64,

    /// Recommended options, best first
    pub options: Vec<ScoredOption>,

    pub generated_at: DateTime<Utc>,
}

impl From<TravelPlan> for PlanTravelResponse {
    fn from(plan: TravelPlan) -> Self {
        Self {
            source: plan.source,
            destination: plan.destination,
            start_date: plan.start_date,
            end_date: plan.end_date,
            distance_km: plan.distance_km,
            options: plan.options,
            generated_at: plan.generated_at,
        }
    }
}

/// Request to save a chosen option.
#[derive(Debug, Deserialize)]
pub struct SaveItineraryRequest {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default, deserialize_with = "optional_date")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "optional_date")]
    pub end_date: Option<NaiveDate>,

    /// The option as returned by the plan endpoint
    pub selected_option: RouteOption,
}

impl From<SaveItineraryRequest> for SaveItinerary {
    fn from(req: SaveItineraryRequest) -> Self {
        Self {
            source: req.source.unwrap_or_default(),
            destination: req.destination.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            selected_option: req.selected_option,
        }
    }
}

/// Response after saving an itinerary.
#[derive(Debug, Serialize)]
pub struct SaveItineraryResponse {
    pub success: bool,
    pub message: String,

    /// Id of the new history record
    pub id: u64,
}

/// Response for the history listing.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Saved itineraries, newest first
    pub history: Vec<HistoryRecord>,
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Parse an optional `YYYY-MM-DD` date, treating `null` and `""` as absent.
fn optional_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
