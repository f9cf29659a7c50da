//! Leg synthesis from per-mode constants.

use crate::domain::{Leg, ModeTable, TransportMode};

use super::random::RandomSource;

/// Lower bound of the cost jitter multiplier.
const JITTER_MIN: f64 = 0.9;

/// Width of the cost jitter range: multipliers fall in `[0.9, 1.1)`.
const JITTER_SPAN: f64 = 0.2;

/// Round to two decimal places.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derives duration, cost and emissions of a leg from its mode profile.
#[derive(Debug, Clone, Copy)]
pub struct LegSynthesizer<'a> {
    modes: &'a ModeTable,
}

impl<'a> LegSynthesizer<'a> {
    pub fn new(modes: &'a ModeTable) -> Self {
        Self { modes }
    }

    /// Build a leg of `distance_km` travelled by `mode`.
    ///
    /// Modes without a profile are priced with the car profile. Duration
    /// and cost use the exact distance; only the reported distance is
    /// rounded. Negative distances are treated as zero.
    pub fn synthesize<R: RandomSource + ?Sized>(
        &self,
        mode: TransportMode,
        distance_km: f64,
        random: &mut R,
    ) -> Leg {
        let distance_km = distance_km.max(0.0);
        let profile = self.modes.profile(mode);

        let duration_minutes = (distance_km / profile.speed_kmh * 60.0).round() as i64;
        let jitter = JITTER_MIN + random.unit() * JITTER_SPAN;
        let estimated_cost = round_cents(distance_km * profile.cost_per_km * jitter);

        Leg {
            mode,
            mode_name: profile.name.to_string(),
            distance_km: round_tenths(distance_km),
            duration_minutes,
            estimated_cost,
            co2_kg: round_cents(distance_km * profile.co2_factor),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::planner::random::FixedRandom;
    use proptest::prelude::*;

    fn any_mode() -> impl Strategy<Value = TransportMode> {
        prop::sample::select(TransportMode::ALL.to_vec())
    }

    proptest! {
        /// Duration is the rounded travel time at the profile's speed
        #[test]
        fn duration_formula(mode in any_mode(), km in 0.0f64..20_000.0, u in 0.0f64..1.0) {
            let modes = ModeTable::default();
            let l = LegSynthesizer::new(&modes).synthesize(mode, km, &mut FixedRandom::new(u));
            let expected = (km / modes.profile(mode).speed_kmh * 60.0).round() as i64;
            prop_assert_eq!(l.duration_minutes, expected);
            prop_assert!(l.duration_minutes >= 0);
        }

        /// Cost stays within the jitter band around the nominal price
        #[test]
        fn cost_within_jitter(mode in any_mode(), km in 0.0f64..20_000.0, u in 0.0f64..1.0) {
            let modes = ModeTable::default();
            let l = LegSynthesizer::new(&modes).synthesize(mode, km, &mut FixedRandom::new(u));
            let nominal = km * modes.profile(mode).cost_per_km;
            prop_assert!(l.estimated_cost >= round_cents(nominal * 0.9) - 0.01);
            prop_assert!(l.estimated_cost <= round_cents(nominal * 1.1) + 0.01);
        }
    }
}
