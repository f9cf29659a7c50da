//! Planner configuration.

/// Thresholds and fixed penalties used when building and ranking options.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Distances above this (km) get a direct flight option.
    pub flight_min_km: f64,

    /// Distances above this (km) get a flight plus car option.
    pub multimodal_min_km: f64,

    /// Share of the distance flown in the flight plus car option.
    pub flight_share: f64,

    /// Ground and boarding time added to a direct flight (minutes).
    pub boarding_overhead_mins: i64,

    /// Transfer time between the legs of a multimodal option (minutes).
    pub transfer_penalty_mins: i64,

    /// Maximum number of recommendations returned.
    pub max_results: usize,

    /// Options shorter than this (minutes) earn the duration bonus.
    pub short_trip_mins: i64,
}

impl PlannerConfig {
    /// Set a custom result limit.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            flight_min_km: 500.0,
            multimodal_min_km: 800.0,
            flight_share: 0.85,
            boarding_overhead_mins: 90,
            transfer_penalty_mins: 60,
            max_results: 5,
            short_trip_mins: 300, // 5 hours
        }
    }
}
