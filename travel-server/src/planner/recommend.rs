//! Scoring and ranking of route options against user preferences.

use tracing::warn;

use crate::domain::{
    EffectivePreferences, PreferenceOverride, Preferences, RouteOption, ScoredOption, UserId,
};

use super::config::PlannerConfig;

/// Score every option starts from.
const BASE_SCORE: u32 = 100;

/// Bonus for using at least one preferred mode.
const PREFERRED_MODE_BONUS: u32 = 20;

/// Bonus for fitting under the budget ceiling.
const BUDGET_BONUS: u32 = 10;

/// Bonus for short trips.
const SHORT_TRIP_BONUS: u32 = 5;

/// Error from a preference lookup.
#[derive(Debug, Clone, thiserror::Error)]
#[error("preference lookup failed for user {user}: {message}")]
pub struct LookupError {
    pub user: UserId,
    pub message: String,
}

/// Trait for reading stored user preferences.
///
/// This abstraction allows the recommender to be tested without a store.
pub trait PreferenceLookup {
    /// Stored preferences for `user`, or `None` if the user has none.
    fn lookup_preferences(&self, user: UserId) -> Result<Option<Preferences>, LookupError>;
}

/// Lookup for callers without any stored preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreferences;

impl PreferenceLookup for NoPreferences {
    fn lookup_preferences(&self, _user: UserId) -> Result<Option<Preferences>, LookupError> {
        Ok(None)
    }
}

/// Ranks options for a user.
pub struct Recommender<'a, P: PreferenceLookup + ?Sized> {
    preferences: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, P: PreferenceLookup + ?Sized> Recommender<'a, P> {
    pub fn new(preferences: &'a P, config: &'a PlannerConfig) -> Self {
        Self {
            preferences,
            config,
        }
    }

    /// Work out the preferences to score with.
    ///
    /// A failed lookup is logged and treated as "no stored preferences".
    pub fn effective_preferences(
        &self,
        user: Option<UserId>,
        request: Option<&PreferenceOverride>,
    ) -> EffectivePreferences {
        let stored = user.and_then(|user| match self.preferences.lookup_preferences(user) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(%user, error = %e, "falling back to default preferences");
                None
            }
        });

        EffectivePreferences::resolve(stored.as_ref(), request)
    }

    /// Score a single option.
    pub fn score(&self, option: &RouteOption, preferences: &EffectivePreferences) -> u32 {
        let mut score = BASE_SCORE;

        if !preferences.preferred_modes.is_empty() && option.uses_any(&preferences.preferred_modes)
        {
            score += PREFERRED_MODE_BONUS;
        }
        if preferences.within_budget(option.total_cost) {
            score += BUDGET_BONUS;
        }
        if option.total_duration_minutes < self.config.short_trip_mins {
            score += SHORT_TRIP_BONUS;
        }

        score
    }

    /// Score, rank best-first and truncate to `max_results`.
    ///
    /// Equal scores keep their input order.
    pub fn recommend(
        &self,
        user: Option<UserId>,
        request: Option<&PreferenceOverride>,
        options: Vec<RouteOption>,
    ) -> Vec<ScoredOption> {
        let preferences = self.effective_preferences(user, request);

        let mut scored: Vec<ScoredOption> = options
            .into_iter()
            .map(|option| ScoredOption {
                score: self.score(&option, &preferences),
                option,
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.config.max_results);
        scored
    }
}
