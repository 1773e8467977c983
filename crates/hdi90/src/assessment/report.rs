use serde::Serialize;

use super::scoring::{Domain, HdiScores};

/// Display rounding for every score shown to the user.
pub fn round_display(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Scores rounded for display with the domain that most limits the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    #[serde(rename = "AarogyaShree")]
    pub aarogya_shree: f64,
    #[serde(rename = "EducationScore")]
    pub education_score: f64,
    #[serde(rename = "HappinessScore")]
    pub happiness_score: f64,
    #[serde(rename = "NetImpact")]
    pub net_impact: f64,
    #[serde(rename = "HDI20")]
    pub hdi20: f64,
    pub focus_domain: Domain,
}

impl ScoreCard {
    pub fn from_scores(scores: &HdiScores) -> Self {
        Self {
            aarogya_shree: round_display(scores.aarogya_shree),
            education_score: round_display(scores.education_score),
            happiness_score: round_display(scores.happiness_score),
            net_impact: round_display(scores.net_impact),
            hdi20: round_display(scores.hdi20),
            focus_domain: focus_domain(scores),
        }
    }
}

/// Lowest domain; a geometric mean gains most from lifting its smallest factor.
/// Ties go to the earlier domain.
pub fn focus_domain(scores: &HdiScores) -> Domain {
    let mut focus = Domain::Health;
    for domain in Domain::ALL {
        if scores.domain(domain) < scores.domain(focus) {
            focus = domain;
        }
    }
    focus
}
