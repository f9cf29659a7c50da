//! Planner facade: validates requests and wires the pipeline together.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::domain::{
    ModeTable, NewHistoryRecord, PreferenceOverride, RouteOption, ScoredOption, UserId,
};

use super::build::OptionBuilder;
use super::config::PlannerConfig;
use super::distance::{DistanceLookup, DistanceResolver};
use super::random::RandomSource;
use super::recommend::{PreferenceLookup, Recommender};
use super::synth::LegSynthesizer;

/// Error from planning or saving a trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Source or destination was missing or blank
    #[error("source and destination required")]
    MissingEndpoint,

    /// End date before start date
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Require a non-blank city name.
fn require_city(name: &str) -> Result<(), PlanError> {
    if name.trim().is_empty() {
        return Err(PlanError::MissingEndpoint);
    }
    Ok(())
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), PlanError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(PlanError::EndBeforeStart { start, end }),
        _ => Ok(()),
    }
}

/// Request to plan a trip between two cities.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub source: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Per-request preference override.
    pub preferences: Option<PreferenceOverride>,
}

impl PlanRequest {
    /// Create a request with no dates or override.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    pub fn with_preferences(mut self, preferences: PreferenceOverride) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Validate the request.
    ///
    /// Dates are carried through unchecked; only saved itineraries must be
    /// in order.
    pub fn validate(&self) -> Result<(), PlanError> {
        require_city(&self.source)?;
        require_city(&self.destination)
    }
}

/// Result of planning a trip.
#[derive(Debug, Clone)]
pub struct TravelPlan {
    pub source: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Resolved distance between the two cities.
    pub distance_km: f64,

    /// Recommended options, best first.
    pub options: Vec<ScoredOption>,

    pub generated_at: DateTime<Utc>,
}

/// An option the user chose to keep.
#[derive(Debug, Clone)]
pub struct SaveItinerary {
    pub source: String,
    pub destination: String,

    /// Defaults to today when absent.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    pub selected_option: RouteOption,
}

impl SaveItinerary {
    /// Shape the itinerary into a history record for `user`.
    ///
    /// `today` is used when no start date was given.
    pub fn into_record(
        self,
        user: UserId,
        today: NaiveDate,
    ) -> Result<NewHistoryRecord, PlanError> {
        require_city(&self.source)?;
        require_city(&self.destination)?;

        let start_date = self.start_date.unwrap_or(today);
        check_dates(Some(start_date), self.end_date)?;

        let option = self.selected_option;
        Ok(NewHistoryRecord {
            user_id: user,
            source: self.source,
            destination: self.destination,
            start_date,
            end_date: self.end_date,
            modes: option.modes.clone(),
            distance_km: Some(option.total_distance_km),
            duration_minutes: Some(option.total_duration_minutes),
            estimated_cost: Some(option.total_cost),
            itinerary: Some(option),
        })
    }
}

/// Route option generator and recommender.
///
/// Holds references to the immutable tables and configuration; each call
/// brings its own random source, so one planner can serve concurrent
/// requests.
pub struct Planner<'a, L: DistanceLookup + ?Sized, P: PreferenceLookup + ?Sized> {
    modes: &'a ModeTable,
    distances: &'a L,
    preferences: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, L: DistanceLookup + ?Sized, P: PreferenceLookup + ?Sized> Planner<'a, L, P> {
    /// Create a new planner.
    pub fn new(
        modes: &'a ModeTable,
        distances: &'a L,
        preferences: &'a P,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            modes,
            distances,
            preferences,
            config,
        }
    }

    fn builder(&self) -> OptionBuilder<'a, L> {
        OptionBuilder::new(
            DistanceResolver::new(self.distances),
            LegSynthesizer::new(self.modes),
            self.config,
        )
    }

    /// Plan a trip and rank the options for `user`.
    pub fn plan_route<R: RandomSource + ?Sized>(
        &self,
        request: &PlanRequest,
        user: Option<UserId>,
        random: &mut R,
    ) -> Result<TravelPlan, PlanError> {
        request.validate()?;

        let options = self
            .builder()
            .build(&request.source, &request.destination, random);
        // Every option spans the whole resolved distance
        let distance_km = options.first().map_or(0.0, |o| o.total_distance_km);
        let candidates = options.len();

        let options = Recommender::new(self.preferences, self.config).recommend(
            user,
            request.preferences.as_ref(),
            options,
        );

        debug!(
            source = %request.source,
            destination = %request.destination,
            distance_km,
            candidates,
            returned = options.len(),
            "planned route"
        );

        Ok(TravelPlan {
            source: request.source.clone(),
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            distance_km,
            options,
            generated_at: Utc::now(),
        })
    }

    /// Shape a chosen option into a history record, dated today if needed.
    ///
    /// Storage is up to the caller.
    pub fn save_selected_option(
        &self,
        user: UserId,
        itinerary: SaveItinerary,
    ) -> Result<NewHistoryRecord, PlanError> {
        itinerary.into_record(user, Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Preferences, TransportMode};
    use crate::planner::distance::us_cities;
    use crate::planner::random::{FixedRandom, SeededRandom};
    use crate::planner::recommend::{LookupError, NoPreferences};

    struct OneUser(UserId, Preferences);

    impl PreferenceLookup for OneUser {
        fn lookup_preferences(&self, user: UserId) -> Result<Option<Preferences>, LookupError> {
            Ok((user == self.0).then(|| self.1.clone()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user(id: u64) -> UserId {
        UserId::new(id).unwrap()
    }

    fn plan(request: &PlanRequest) -> Result<TravelPlan, PlanError> {
        let modes = ModeTable::default();
        let table = us_cities();
        let config = PlannerConfig::default();
        Planner::new(&modes, &table, &NoPreferences, &config).plan_route(
            request,
            None,
            &mut FixedRandom::new(0.5),
        )
    }

    #[test]
    fn missing_endpoints_rejected() {
        assert_eq!(
            plan(&PlanRequest::new("", "Boston")).unwrap_err(),
            PlanError::MissingEndpoint
        );
        assert_eq!(
            plan(&PlanRequest::new("Boston", "   ")).unwrap_err(),
            PlanError::MissingEndpoint
        );
    }

    #[test]
    fn plan_passes_dates_through_unchecked() {
        let mut request = PlanRequest::new("Boston", "New York");
        request.start_date = Some(date(2026, 6, 10));
        request.end_date = Some(date(2026, 6, 1));

        let plan = plan(&request).unwrap();
        assert_eq!(plan.start_date, Some(date(2026, 6, 10)));
        assert_eq!(plan.end_date, Some(date(2026, 6, 1)));
    }

    #[test]
    fn plan_short_trip() {
        let plan = plan(&PlanRequest::new("New York", "Boston")).unwrap();

        assert_eq!(plan.source, "New York");
        assert_eq!(plan.destination, "Boston");
        assert_eq!(plan.distance_km, 306.0);
        assert_eq!(plan.options.len(), 3);
        // Bus 262, train 153, car 204 minutes: all get the duration bonus
        assert!(plan.options.iter().all(|o| o.score == 105));
        let ids: Vec<&str> = plan.options.iter().map(|o| o.option.id.as_str()).collect();
        assert_eq!(ids, vec!["bus-direct", "train-direct", "car-direct"]);
    }

    #[test]
    fn plan_long_trip_is_capped_at_five() {
        let plan = plan(&PlanRequest::new("New York", "Los Angeles")).unwrap();

        assert_eq!(plan.distance_km, 3944.0);
        assert_eq!(plan.options.len(), 5);
        for pair in plan.options.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn plan_uses_stored_preferences_and_override() {
        let modes = ModeTable::default();
        let table = us_cities();
        let config = PlannerConfig::default();
        let lookup = OneUser(
            user(1),
            Preferences {
                preferred_modes: vec![TransportMode::Train],
                ..Preferences::default()
            },
        );
        let planner = Planner::new(&modes, &table, &lookup, &config);

        let request = PlanRequest::new("Chicago", "New York");
        let plan = planner
            .plan_route(&request, Some(user(1)), &mut FixedRandom::new(0.5))
            .unwrap();
        assert_eq!(plan.options[0].option.id, "train-direct");
        assert_eq!(plan.options[0].score, 120);

        let request = request.with_preferences(PreferenceOverride {
            preferred_modes: Some(vec![TransportMode::Flight]),
            budget_max: None,
        });
        let plan = planner
            .plan_route(&request, Some(user(1)), &mut FixedRandom::new(0.5))
            .unwrap();
        // Both flight options score 100 + 20 + 5 (flight-direct is
        // 86 + 90 = 176 minutes); the cheaper flight-car stays ahead
        assert_eq!(plan.options[0].option.id, "flight-car");
        assert_eq!(plan.options[0].score, 125);
        assert_eq!(plan.options[1].option.id, "flight-direct");
        assert_eq!(plan.options[1].score, 125);
        let train = plan
            .options
            .iter()
            .find(|o| o.option.id == "train-direct")
            .unwrap();
        assert_eq!(train.score, 100);
    }

    #[test]
    fn seeded_plans_are_reproducible() {
        let modes = ModeTable::default();
        let table = us_cities();
        let config = PlannerConfig::default();
        let planner = Planner::new(&modes, &table, &NoPreferences, &config);
        let request = PlanRequest::new("Lisbon", "Madrid");

        let a = planner
            .plan_route(&request, None, &mut SeededRandom::from_seed_u64(11))
            .unwrap();
        let b = planner
            .plan_route(&request, None, &mut SeededRandom::from_seed_u64(11))
            .unwrap();
        assert_eq!(a.distance_km, b.distance_km);
        assert_eq!(a.options, b.options);
    }

    #[test]
    fn plan_distance_matches_options() {
        let plan = plan(&PlanRequest::new("Miami", "Chicago")).unwrap();

        assert_eq!(plan.distance_km, 1892.0);
        assert_eq!(plan.options.len(), 5);
        assert!(plan.options.iter().all(|o| o.option.total_distance_km == 1892.0));
    }

    fn selected() -> RouteOption {
        plan(&PlanRequest::new("New York", "Boston"))
            .unwrap()
            .options
            .into_iter()
            .map(|o| o.option)
            .find(|o| o.id == "train-direct")
            .unwrap()
    }

    #[test]
    fn itinerary_shaped_into_record() {
        let itinerary = SaveItinerary {
            source: "New York".to_string(),
            destination: "Boston".to_string(),
            start_date: Some(date(2026, 7, 4)),
            end_date: Some(date(2026, 7, 6)),
            selected_option: selected(),
        };
        let record = itinerary.into_record(user(8), date(2026, 1, 1)).unwrap();

        assert_eq!(record.user_id, user(8));
        assert_eq!(record.start_date, date(2026, 7, 4));
        assert_eq!(record.end_date, Some(date(2026, 7, 6)));
        assert_eq!(record.modes, vec![TransportMode::Train]);
        assert_eq!(record.distance_km, Some(306.0));
        assert_eq!(record.duration_minutes, Some(153));
        assert_eq!(record.estimated_cost, Some(24.48));
        assert_eq!(record.itinerary.as_ref().unwrap().id, "train-direct");
    }

    #[test]
    fn itinerary_start_defaults_to_today() {
        let itinerary = SaveItinerary {
            source: "New York".to_string(),
            destination: "Boston".to_string(),
            start_date: None,
            end_date: None,
            selected_option: selected(),
        };
        let record = itinerary.into_record(user(8), date(2026, 10, 16)).unwrap();
        assert_eq!(record.start_date, date(2026, 10, 16));
    }

    #[test]
    fn itinerary_dates_must_be_ordered() {
        let mut itinerary = SaveItinerary {
            source: "New York".to_string(),
            destination: "Boston".to_string(),
            start_date: Some(date(2026, 6, 10)),
            end_date: Some(date(2026, 6, 1)),
            selected_option: selected(),
        };
        assert_eq!(
            itinerary.clone().into_record(user(8), date(2026, 1, 1)).unwrap_err(),
            PlanError::EndBeforeStart {
                start: date(2026, 6, 10),
                end: date(2026, 6, 1)
            }
        );

        // A missing start date means today
        itinerary.start_date = None;
        assert!(itinerary.into_record(user(8), date(2026, 6, 2)).is_err());
    }

    #[test]
    fn itinerary_requires_endpoints() {
        let itinerary = SaveItinerary {
            source: "New York".to_string(),
            destination: String::new(),
            start_date: None,
            end_date: None,
            selected_option: selected(),
        };
        assert_eq!(
            itinerary.into_record(user(8), date(2026, 10, 16)).unwrap_err(),
            PlanError::MissingEndpoint
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            PlanError::MissingEndpoint.to_string(),
            "source and destination required"
        );
        let err = PlanError::EndBeforeStart {
            start: date(2026, 3, 2),
            end: date(2026, 3, 1),
        };
        assert_eq!(
            err.to_string(),
            "end date 2026-03-01 is before start date 2026-03-02"
        );
    }
}
