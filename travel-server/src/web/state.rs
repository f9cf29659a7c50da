//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::ModeTable;
use crate::planner::{DistanceTable, PlannerConfig, SeededRandom};
use crate::store::JsonStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Per-mode constants
    pub modes: Arc<ModeTable>,

    /// Known city distances
    pub distances: Arc<DistanceTable>,

    /// Preferences and history
    pub store: Arc<JsonStore>,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,

    /// Fixed seed for reproducible plans; fresh entropy per request if unset
    pub rng_seed: Option<u64>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        modes: ModeTable,
        distances: DistanceTable,
        store: JsonStore,
        config: PlannerConfig,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            modes: Arc::new(modes),
            distances: Arc::new(distances),
            store: Arc::new(store),
            config: Arc::new(config),
            rng_seed,
        }
    }

    /// Random source for one request.
    pub fn random(&self) -> SeededRandom {
        match self.rng_seed {
            Some(seed) => SeededRandom::from_seed_u64(seed),
            None => SeededRandom::from_entropy(),
        }
    }
}
