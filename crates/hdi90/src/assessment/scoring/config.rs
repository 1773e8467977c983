use serde::{Deserialize, Serialize};

use super::normalize::EPSILON;

/// Saturation points and floor used by the scoring rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub epsilon: f64,
    pub exercise_cap_minutes: f64,
    pub personal_emissions_cap_kg: f64,
    pub group_emissions_cap_kg: f64,
    pub positive_actions_saturation: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            exercise_cap_minutes: 420.0,
            personal_emissions_cap_kg: 3000.0,
            group_emissions_cap_kg: 20_000.0,
            positive_actions_saturation: 50.0,
        }
    }
}
