//! Route option generator and recommender.
//!
//! This module implements the core planning pipeline that answers:
//! "What are the best ways to get from this city to that one, for me?"
//!
//! A city pair is resolved to a distance, legs are synthesized per mode
//! from fixed per-mode constants, candidate options are assembled and
//! sorted by cost, and finally scored against the user's preferences.

mod build;
mod config;
mod distance;
mod plan;
mod random;
mod recommend;
mod synth;

pub use build::OptionBuilder;
pub use config::PlannerConfig;
pub use distance::{
    DistanceLookup, DistanceResolver, DistanceTable, DistanceTableBuilder, normalize_city,
    us_cities,
};
pub use plan::{PlanError, PlanRequest, Planner, SaveItinerary, TravelPlan};
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use recommend::{LookupError, NoPreferences, PreferenceLookup, Recommender};
pub use synth::LegSynthesizer;
