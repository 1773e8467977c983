use super::super::domain::RawAssessment;
use super::config::ScoringConfig;
use super::normalize::{flag, normalize, unit};
use super::{Domain, ScoreComponent};

const HEALTH_FACTOR_WEIGHT: f64 = 0.2;
const EDUCATION_FACTOR_WEIGHT: f64 = 0.2;
const NEUTRAL_GENETIC_SCORE: f64 = 0.5;

fn component(domain: Domain, factor: &'static str, weight: f64, value: f64) -> ScoreComponent {
    ScoreComponent {
        domain,
        factor,
        weight,
        value,
    }
}

pub(crate) fn health_components(raw: &RawAssessment, config: &ScoringConfig) -> Vec<ScoreComponent> {
    let hba1c = normalize(9.0 - raw.hba1c, 4.5, 9.0);
    let systolic = normalize(180.0 - raw.systolic_bp, 0.0, 90.0);
    let biomarkers = (hba1c + systolic) / 2.0;
    let preventive = 0.4 * flag(raw.has_recent_checkup) + 0.6 * biomarkers;

    let psychosomatic = normalize(27.0 - raw.phq9, 0.0, 27.0);
    let end_of_life = normalize(raw.expect_quality_later, 0.0, 10.0);

    let genetic = if raw.has_genetic_risk_known {
        unit(1.0 - raw.genetic_risk_score_pct / 100.0)
    } else {
        NEUTRAL_GENETIC_SCORE
    };

    let exercise = normalize(raw.exercise_mins_per_week, 0.0, config.exercise_cap_minutes);
    let diet = normalize(raw.diet_score, 0.0, 10.0);
    let lifestyle = (exercise + diet) / 2.0;

    vec![
        component(Domain::Health, "preventive_diagnostic", HEALTH_FACTOR_WEIGHT, preventive),
        component(Domain::Health, "psychosomatic", HEALTH_FACTOR_WEIGHT, psychosomatic),
        component(Domain::Health, "end_of_life_quality", HEALTH_FACTOR_WEIGHT, end_of_life),
        component(Domain::Health, "genetic", HEALTH_FACTOR_WEIGHT, genetic),
        component(Domain::Health, "lifestyle", HEALTH_FACTOR_WEIGHT, lifestyle),
    ]
}

pub(crate) fn education_components(raw: &RawAssessment) -> Vec<ScoreComponent> {
    let literacy = (normalize(raw.literacy_mother_tongue, 0.0, 10.0)
        + normalize(raw.literacy_english, 0.0, 10.0))
        / 2.0;
    let aptitude = 0.6 * normalize(raw.cognitive_test_score_pct, 0.0, 100.0)
        + 0.4 * normalize(raw.growth_mindset, 0.0, 10.0);

    vec![
        component(Domain::Education, "literacy", EDUCATION_FACTOR_WEIGHT, literacy),
        component(Domain::Education, "aptitude", EDUCATION_FACTOR_WEIGHT, aptitude),
        component(
            Domain::Education,
            "design_thinking",
            EDUCATION_FACTOR_WEIGHT,
            normalize(raw.design_thinking_score, 0.0, 10.0),
        ),
        component(
            Domain::Education,
            "ikigai_competence",
            EDUCATION_FACTOR_WEIGHT,
            normalize(raw.ikigai_competence, 0.0, 10.0),
        ),
        component(
            Domain::Education,
            "entrepreneurial_skill",
            EDUCATION_FACTOR_WEIGHT,
            normalize(raw.entrepreneurial_skill, 0.0, 10.0),
        ),
    ]
}

pub(crate) fn happiness_components(raw: &RawAssessment) -> Vec<ScoreComponent> {
    let domains: [(&'static str, f64, f64); 9] = [
        ("psychological_wellbeing", 0.15, raw.psych_wellbeing),
        ("health", 0.10, raw.h_health_domain),
        ("education", 0.10, raw.h_education_domain),
        ("time_use", 0.10, raw.time_use),
        ("cultural_resilience", 0.10, raw.cultural_resilience),
        ("good_governance", 0.10, raw.good_governance),
        ("community_vitality", 0.10, raw.community_vitality),
        ("ecological_connection", 0.10, raw.ecological_connection),
        ("living_standards", 0.15, raw.living_standards),
    ];

    domains
        .into_iter()
        .map(|(factor, weight, answer)| {
            component(Domain::Happiness, factor, weight, normalize(answer, 0.0, 10.0))
        })
        .collect()
}

pub(crate) fn environment_components(
    raw: &RawAssessment,
    config: &ScoringConfig,
) -> Vec<ScoreComponent> {
    let planetary = normalize(raw.planetary_boundary_score, 0.0, 10.0);
    let personal = 1.0 - normalize(raw.monthly_co2e_kg, 0.0, config.personal_emissions_cap_kg);
    let group = 1.0 - normalize(raw.group_emissions_kg, 0.0, config.group_emissions_cap_kg);
    // ln(1 + n) gives each additional action less credit than the last.
    let actions = normalize(
        raw.positive_actions_count.ln_1p(),
        0.0,
        config.positive_actions_saturation.ln_1p(),
    );

    vec![
        component(Domain::Environment, "planetary_boundaries", 0.3, planetary),
        component(Domain::Environment, "personal_emissions", 0.2, personal),
        component(Domain::Environment, "group_emissions", 0.2, group),
        component(Domain::Environment, "positive_actions", 0.3, actions),
    ]
}

/// Weighted sum of a domain's components, floored at `epsilon` and capped at 1.
pub(crate) fn domain_score(components: &[ScoreComponent], epsilon: f64) -> f64 {
    let total: f64 = components
        .iter()
        .map(|component| component.weight * component.value)
        .sum();
    unit(total).max(epsilon)
}
