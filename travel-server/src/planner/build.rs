//! Candidate option assembly.
//!
//! Builds the direct single-mode options for a city pair, plus a direct
//! flight and a flight-plus-car option once the trip is long enough.

use tracing::debug;

use crate::domain::{Leg, RouteOption, TransportMode};

use super::config::PlannerConfig;
use super::distance::{DistanceLookup, DistanceResolver};
use super::random::RandomSource;
use super::synth::{LegSynthesizer, round_cents};

/// Ground modes offered as direct options regardless of distance.
const GROUND_MODES: [TransportMode; 3] = [
    TransportMode::Train,
    TransportMode::Bus,
    TransportMode::Car,
];

/// An option whose totals may still be unset.
///
/// Unset totals are filled from the legs by [`OptionDraft::finish`]; totals
/// that were set explicitly (overheads, transfer penalties) are kept.
#[derive(Debug)]
struct OptionDraft {
    id: String,
    legs: Vec<Leg>,
    total_distance_km: f64,
    total_duration_minutes: Option<i64>,
    total_cost: Option<f64>,
}

impl OptionDraft {
    fn new(id: impl Into<String>, legs: Vec<Leg>, total_distance_km: f64) -> Self {
        Self {
            id: id.into(),
            legs,
            total_distance_km,
            total_duration_minutes: None,
            total_cost: None,
        }
    }

    fn with_duration(mut self, minutes: i64) -> Self {
        self.total_duration_minutes = Some(minutes);
        self
    }

    fn with_cost(mut self, cost: f64) -> Self {
        self.total_cost = Some(cost);
        self
    }

    /// Backfill unset totals from the legs.
    fn finish(self) -> RouteOption {
        let total_cost = self
            .total_cost
            .unwrap_or_else(|| self.legs.iter().map(|l| l.estimated_cost).sum());
        let total_duration_minutes = self
            .total_duration_minutes
            .unwrap_or_else(|| self.legs.iter().map(|l| l.duration_minutes).sum());
        let total_co2_kg = round_cents(self.legs.iter().map(|l| l.co2_kg).sum());

        let mut modes: Vec<TransportMode> = Vec::with_capacity(self.legs.len());
        for leg in &self.legs {
            if !modes.contains(&leg.mode) {
                modes.push(leg.mode);
            }
        }

        RouteOption {
            id: self.id,
            legs: self.legs,
            modes,
            total_distance_km: self.total_distance_km,
            total_duration_minutes,
            total_cost,
            total_co2_kg,
        }
    }
}

/// Assembles candidate route options for a city pair.
#[derive(Debug)]
pub struct OptionBuilder<'a, L: DistanceLookup + ?Sized> {
    resolver: DistanceResolver<'a, L>,
    synthesizer: LegSynthesizer<'a>,
    config: &'a PlannerConfig,
}

impl<'a, L: DistanceLookup + ?Sized> OptionBuilder<'a, L> {
    pub fn new(
        resolver: DistanceResolver<'a, L>,
        synthesizer: LegSynthesizer<'a>,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            resolver,
            synthesizer,
            config,
        }
    }

    /// Resolve the distance between two cities and build options for it.
    ///
    /// Returns at least three options, sorted by ascending total cost.
    pub fn build<R: RandomSource + ?Sized>(
        &self,
        source: &str,
        destination: &str,
        random: &mut R,
    ) -> Vec<RouteOption> {
        let total_km = self.resolver.resolve(source, destination, random);
        self.build_for_distance(total_km, random)
    }

    /// Build options for a trip of `total_km`.
    ///
    /// - above `flight_min_km`: a direct flight, with boarding overhead
    ///   added to its duration
    /// - always: direct train, bus and car
    /// - above `multimodal_min_km`: flight for `flight_share` of the
    ///   distance, then car, with a transfer penalty between the legs
    ///
    /// The result is stably sorted by total cost, so equal costs keep the
    /// order above.
    pub fn build_for_distance<R: RandomSource + ?Sized>(
        &self,
        total_km: f64,
        random: &mut R,
    ) -> Vec<RouteOption> {
        let config = self.config;
        let mut drafts = Vec::with_capacity(5);

        if total_km > config.flight_min_km {
            let leg = self
                .synthesizer
                .synthesize(TransportMode::Flight, total_km, random);
            let duration = leg.duration_minutes + config.boarding_overhead_mins;
            drafts.push(
                OptionDraft::new("flight-direct", vec![leg], total_km).with_duration(duration),
            );
        }

        for mode in GROUND_MODES {
            let leg = self.synthesizer.synthesize(mode, total_km, random);
            drafts.push(OptionDraft::new(format!("{mode}-direct"), vec![leg], total_km));
        }

        if total_km > config.multimodal_min_km {
            let flight_km = total_km * config.flight_share;
            let ground_km = total_km - flight_km;
            let flight = self
                .synthesizer
                .synthesize(TransportMode::Flight, flight_km, random);
            let ground = self
                .synthesizer
                .synthesize(TransportMode::Car, ground_km, random);

            let duration =
                flight.duration_minutes + config.transfer_penalty_mins + ground.duration_minutes;
            let cost = flight.estimated_cost + ground.estimated_cost;

            drafts.push(
                OptionDraft::new("flight-car", vec![flight, ground], total_km)
                    .with_duration(duration)
                    .with_cost(cost),
            );
        }

        let mut options: Vec<RouteOption> = drafts.into_iter().map(OptionDraft::finish).collect();
        options.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));

        debug!(total_km, options = options.len(), "built route options");

        options
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::ModeTable;
    use crate::planner::distance::DistanceTable;
    use crate::planner::random::SeededRandom;
    use proptest::prelude::*;

    fn build(km: f64, seed: u64) -> Vec<RouteOption> {
        let modes = ModeTable::default();
        let table = DistanceTable::new();
        let config = PlannerConfig::default();
        OptionBuilder::new(
            DistanceResolver::new(&table),
            LegSynthesizer::new(&modes),
            &config,
        )
        .build_for_distance(km, &mut SeededRandom::from_seed_u64(seed))
    }

    proptest! {
        /// Ground options are always offered and the list is cost-sorted
        #[test]
        fn ground_options_and_sorted(km in 0.0f64..10_000.0, seed in any::<u64>()) {
            let options = build(km, seed);

            prop_assert!(options.len() >= 3);
            for id in ["train-direct", "bus-direct", "car-direct"] {
                prop_assert!(options.iter().any(|o| o.id == id));
            }
            for pair in options.windows(2) {
                prop_assert!(pair[0].total_cost <= pair[1].total_cost);
            }
        }

        /// Flight options appear exactly above their thresholds
        #[test]
        fn thresholds(km in 0.0f64..3_000.0, seed in any::<u64>()) {
            let options = build(km, seed);
            let has = |id: &str| options.iter().any(|o| o.id == id);

            prop_assert_eq!(has("flight-direct"), km > 500.0);
            prop_assert_eq!(has("flight-car"), km > 800.0);
        }

        /// The combined option carries exactly the transfer penalty
        #[test]
        fn transfer_penalty(km in 801.0f64..10_000.0, seed in any::<u64>()) {
            let options = build(km, seed);
            let combo = options.iter().find(|o| o.id == "flight-car").unwrap();

            prop_assert_eq!(
                combo.total_duration_minutes,
                combo.legs[0].duration_minutes + 60 + combo.legs[1].duration_minutes
            );
        }
    }
}
