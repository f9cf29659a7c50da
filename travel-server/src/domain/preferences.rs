//! User travel preferences and per-request overrides.

use serde::{Deserialize, Deserializer, Serialize};

use super::TransportMode;

/// Stored per-user preferences.
///
/// Only `preferred_modes` and `budget_max` take part in scoring; the other
/// fields are kept for the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Modes the user likes. Empty means no preference.
    #[serde(default, deserialize_with = "known_modes")]
    pub preferred_modes: Vec<TransportMode>,

    #[serde(default)]
    pub budget_min: Option<f64>,

    /// Budget ceiling. `None` means unconstrained.
    #[serde(default)]
    pub budget_max: Option<f64>,

    #[serde(default, deserialize_with = "string_list")]
    pub interests: Vec<String>,
}

/// Preference values supplied with a single plan request.
///
/// Each present field fully replaces the stored value for one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PreferenceOverride {
    #[serde(default, deserialize_with = "optional_known_modes")]
    pub preferred_modes: Option<Vec<TransportMode>>,

    #[serde(default)]
    pub budget_max: Option<f64>,
}

/// Preferences as actually used for scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectivePreferences {
    pub preferred_modes: Vec<TransportMode>,

    /// `None` means unconstrained.
    pub budget_max: Option<f64>,
}

impl EffectivePreferences {
    /// Merge stored preferences with a request override.
    ///
    /// Fields are overridden one by one. A supplied `preferred_modes` list
    /// replaces the stored list outright; the two are never unioned.
    pub fn resolve(stored: Option<&Preferences>, request: Option<&PreferenceOverride>) -> Self {
        let mut effective = stored
            .map(|p| Self {
                preferred_modes: p.preferred_modes.clone(),
                budget_max: p.budget_max,
            })
            .unwrap_or_default();

        if let Some(request) = request {
            if let Some(modes) = &request.preferred_modes {
                effective.preferred_modes = modes.clone();
            }
            if let Some(budget) = request.budget_max {
                effective.budget_max = Some(budget);
            }
        }

        effective
    }

    /// Whether `cost` fits under the budget ceiling.
    ///
    /// Returns `false` when no ceiling is set: only a real ceiling earns a
    /// budget match.
    pub fn within_budget(&self, cost: f64) -> bool {
        self.budget_max.is_some_and(|max| cost <= max)
    }
}

/// Accept a list of mode names, dropping unknown ones and treating `null` as empty.
fn known_modes<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<TransportMode>, D::Error> {
    Ok(optional_known_modes(d)?.unwrap_or_default())
}

fn optional_known_modes<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Vec<TransportMode>>, D::Error> {
    let names: Option<Vec<String>> = Option::deserialize(d)?;
    Ok(names.map(|names| {
        names
            .iter()
            .filter_map(|name| name.parse::<TransportMode>().ok())
            .collect()
    }))
}

fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}
