//! HDI 2.0 scoring: raw answers to four domain scores and their geometric mean.

mod config;
pub mod normalize;
mod rules;

pub use config::ScoringConfig;
pub use normalize::{geometric_mean, normalize, EPSILON};

use super::domain::RawAssessment;
use serde::{Deserialize, Serialize};

/// The four pillars feeding the aggregate index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "AarogyaShree")]
    Health,
    #[serde(rename = "EducationScore")]
    Education,
    #[serde(rename = "HappinessScore")]
    Happiness,
    #[serde(rename = "NetImpact")]
    Environment,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Health,
        Domain::Education,
        Domain::Happiness,
        Domain::Environment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Domain::Health => "AarogyaShree",
            Domain::Education => "EducationScore",
            Domain::Happiness => "HappinessScore",
            Domain::Environment => "NetImpact",
        }
    }
}

/// Domain scores and the aggregate index, each in `[epsilon, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HdiScores {
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
}

impl HdiScores {
    pub fn domain(&self, domain: Domain) -> f64 {
        match domain {
            Domain::Health => self.aarogya_shree,
            Domain::Education => self.education_score,
            Domain::Happiness => self.happiness_score,
            Domain::Environment => self.net_impact,
        }
    }

    pub fn domains(&self) -> [f64; 4] {
        Domain::ALL.map(|domain| self.domain(domain))
    }
}

/// One weighted factor inside a domain, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub domain: Domain,
    pub factor: &'static str,
    pub weight: f64,
    pub value: f64,
}

/// Scores plus the factor trail that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOutcome {
    pub scores: HdiScores,
    pub components: Vec<ScoreComponent>,
}

/// Stateless, deterministic scorer.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: ScoringConfig,
}

impl ScoreEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(&self, raw: &RawAssessment) -> ScoreOutcome {
        let epsilon = self.config.epsilon;

        let health = rules::health_components(raw, &self.config);
        let education = rules::education_components(raw);
        let happiness = rules::happiness_components(raw);
        let environment = rules::environment_components(raw, &self.config);

        let aarogya_shree = rules::domain_score(&health, epsilon);
        let education_score = rules::domain_score(&education, epsilon);
        let happiness_score = rules::domain_score(&happiness, epsilon);
        let net_impact = rules::domain_score(&environment, epsilon);

        let hdi20 = normalize::geometric_mean_with_floor(
            &[aarogya_shree, education_score, happiness_score, net_impact],
            epsilon,
        );

        let mut components = health;
        components.extend(education);
        components.extend(happiness);
        components.extend(environment);

        ScoreOutcome {
            scores: HdiScores {
                aarogya_shree,
                education_score,
                happiness_score,
                net_impact,
                hdi20,
            },
            components,
        }
    }

    pub fn score(&self, raw: &RawAssessment) -> HdiScores {
        self.evaluate(raw).scores
    }
}
