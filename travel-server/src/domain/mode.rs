//! Transport modes and their per-mode constants.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0}")]
pub struct UnknownMode(String);

/// A way of travelling between two cities.
///
/// Serialized as the lowercase mode name.
///
/// # Examples
///
/// ```
/// use travel_server::domain::TransportMode;
///
/// let mode: TransportMode = "train".parse().unwrap();
/// assert_eq!(mode, TransportMode::Train);
/// assert_eq!(mode.as_str(), "train");
///
/// // Parsing is case-insensitive and ignores surrounding whitespace
/// assert_eq!(" Flight ".parse::<TransportMode>().unwrap(), TransportMode::Flight);
///
/// assert!("boat".parse::<TransportMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
}

impl TransportMode {
    /// All modes, in the order options are offered.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Flight,
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::Car,
    ];

    /// Returns the lowercase wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
        }
    }
}

impl FromStr for TransportMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flight" => Ok(TransportMode::Flight),
            "train" => Ok(TransportMode::Train),
            "bus" => Ok(TransportMode::Bus),
            "car" => Ok(TransportMode::Car),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed attributes of a transport mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeProfile {
    /// Human-readable name (e.g. "Flight").
    pub name: &'static str,

    /// Average cruising speed in km/h.
    pub speed_kmh: f64,

    /// Base cost per kilometer.
    pub cost_per_km: f64,

    /// Emitted CO2 in kg per kilometer.
    pub co2_factor: f64,
}

impl ModeProfile {
    pub const fn new(name: &'static str, speed_kmh: f64, cost_per_km: f64, co2_factor: f64) -> Self {
        Self {
            name,
            speed_kmh,
            cost_per_km,
            co2_factor,
        }
    }
}

/// Error building a [`ModeTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeTableError {
    /// The car profile is used as the fallback and must be present
    #[error("mode table must contain a car profile")]
    MissingCar,

    /// Speeds must be strictly positive to derive durations
    #[error("mode {0} has a non-positive speed")]
    NonPositiveSpeed(TransportMode),
}

/// Immutable set of mode profiles.
///
/// Built once at startup and shared by reference. Lookups for a mode
/// without a profile fall back to the car profile, which is guaranteed to
/// exist by construction.
#[derive(Debug, Clone)]
pub struct ModeTable {
    profiles: HashMap<TransportMode, ModeProfile>,
}

impl ModeTable {
    /// Create a table from explicit profiles.
    pub fn new(
        profiles: impl IntoIterator<Item = (TransportMode, ModeProfile)>,
    ) -> Result<Self, ModeTableError> {
        let profiles: HashMap<_, _> = profiles.into_iter().collect();

        if !profiles.contains_key(&TransportMode::Car) {
            return Err(ModeTableError::MissingCar);
        }
        if let Some((mode, _)) = profiles.iter().find(|(_, p)| p.speed_kmh <= 0.0) {
            return Err(ModeTableError::NonPositiveSpeed(*mode));
        }

        Ok(Self { profiles })
    }

    /// Profile for `mode`, or the car profile if the mode is unsupported.
    pub fn profile(&self, mode: TransportMode) -> &ModeProfile {
        self.profiles
            .get(&mode)
            .or_else(|| self.profiles.get(&TransportMode::Car))
            .unwrap_or(&CAR)
    }
}

const CAR: ModeProfile = ModeProfile::new("Car", 90.0, 0.12, 0.15);

impl Default for ModeTable {
    fn default() -> Self {
        let profiles = HashMap::from([
            (
                TransportMode::Flight,
                ModeProfile::new("Flight", 800.0, 0.15, 0.2),
            ),
            (
                TransportMode::Train,
                ModeProfile::new("Train", 120.0, 0.08, 0.05),
            ),
            (TransportMode::Bus, ModeProfile::new("Bus", 70.0, 0.05, 0.08)),
            (TransportMode::Car, CAR),
        ]);
        Self { profiles }
    }
}
