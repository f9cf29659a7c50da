//! A single mode-homogeneous segment of a journey.

use serde::{Deserialize, Serialize};

use super::TransportMode;

/// One segment of travel using a single transport mode.
///
/// Legs are produced by the leg synthesizer and are never stored on their
/// own; they only persist as part of a saved itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Mode used for this leg.
    pub mode: TransportMode,

    /// Display name of the profile the figures were derived from.
    #[serde(rename = "modeName")]
    pub mode_name: String,

    /// Distance in kilometers, rounded to one decimal place.
    pub distance_km: f64,

    /// Travel time in whole minutes.
    pub duration_minutes: i64,

    /// Estimated cost, rounded to cents.
    pub estimated_cost: f64,

    /// Estimated CO2 emissions in kg.
    #[serde(default)]
    pub co2_kg: f64,
}
