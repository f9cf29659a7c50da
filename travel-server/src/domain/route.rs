//! Complete route options and their scored form.

use serde::{Deserialize, Serialize};

use super::{Leg, TransportMode};

/// One complete way to travel from source to destination.
///
/// Totals are carried explicitly rather than derived, because some options
/// add time that no leg accounts for (boarding overhead, transfers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    /// Stable identifier such as `"train-direct"` or `"flight-car"`.
    pub id: String,

    /// Legs in travel order. Never empty.
    pub legs: Vec<Leg>,

    /// Distinct modes used, in leg order.
    pub modes: Vec<TransportMode>,

    pub total_distance_km: f64,
    pub total_duration_minutes: i64,
    pub total_cost: f64,

    #[serde(default)]
    pub total_co2_kg: f64,
}

impl RouteOption {
    /// Sum of the legs' costs.
    pub fn legs_cost(&self) -> f64 {
        self.legs.iter().map(|l| l.estimated_cost).sum()
    }

    /// Sum of the legs' durations.
    pub fn legs_duration(&self) -> i64 {
        self.legs.iter().map(|l| l.duration_minutes).sum()
    }

    /// Whether the option uses more than one transport mode.
    pub fn is_multimodal(&self) -> bool {
        self.modes.len() > 1
    }

    /// Whether any of the option's modes appears in `modes`.
    pub fn uses_any(&self, modes: &[TransportMode]) -> bool {
        self.modes.iter().any(|m| modes.contains(m))
    }
}

/// A route option with its recommendation score.
///
/// Serializes as the option's fields plus `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOption {
    #[serde(flatten)]
    pub option: RouteOption,

    pub score: u32,
}
