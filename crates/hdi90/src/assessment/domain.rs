use serde::{Deserialize, Deserializer, Serialize};

/// Wizard step. Serialized as its 1-based number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    #[default]
    Health,
    Education,
    Happiness,
    Environment,
    Review,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Health,
        Stage::Education,
        Stage::Happiness,
        Stage::Environment,
        Stage::Review,
    ];

    pub fn number(self) -> u8 {
        match self {
            Stage::Health => 1,
            Stage::Education => 2,
            Stage::Happiness => 3,
            Stage::Environment => 4,
            Stage::Review => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|stage| stage.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Health => "Health",
            Stage::Education => "Education",
            Stage::Happiness => "Happiness",
            Stage::Environment => "Environment",
            Stage::Review => "Review",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = InvalidStage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Stage::from_number(value).ok_or(InvalidStage(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stage must be between 1 and 5, found {0}")]
pub struct InvalidStage(pub u8);

/// One survey answer per field. Missing keys deserialize to the documented defaults and
/// unknown keys are ignored, so older or newer drafts still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAssessment {
    // Health
    pub has_recent_checkup: bool,
    #[serde(deserialize_with = "nullable_number")]
    pub hba1c: f64,
    #[serde(rename = "systolicBP", deserialize_with = "nullable_number")]
    pub systolic_bp: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub phq9: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub expect_quality_later: f64,
    pub has_genetic_risk_known: bool,
    #[serde(deserialize_with = "nullable_number")]
    pub genetic_risk_score_pct: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub exercise_mins_per_week: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub diet_score: f64,

    // Education
    #[serde(deserialize_with = "nullable_number")]
    pub literacy_mother_tongue: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub literacy_english: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub cognitive_test_score_pct: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub growth_mindset: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub design_thinking_score: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub ikigai_competence: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub entrepreneurial_skill: f64,

    // Happiness
    #[serde(deserialize_with = "nullable_number")]
    pub psych_wellbeing: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub h_health_domain: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub h_education_domain: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub time_use: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub cultural_resilience: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub good_governance: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub community_vitality: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub ecological_connection: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub living_standards: f64,

    // Environment
    #[serde(rename = "monthlyCO2eKg", deserialize_with = "nullable_number")]
    pub monthly_co2e_kg: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub group_emissions_kg: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub positive_actions_count: f64,
    #[serde(deserialize_with = "nullable_number")]
    pub planetary_boundary_score: f64,
}

// A cleared answer arrives as `null` and decodes as NaN: it scores 0 and fails stage checks.
fn nullable_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl Default for RawAssessment {
    fn default() -> Self {
        Self {
            has_recent_checkup: true,
            hba1c: 5.6,
            systolic_bp: 120.0,
            phq9: 4.0,
            expect_quality_later: 7.0,
            has_genetic_risk_known: false,
            genetic_risk_score_pct: 50.0,
            exercise_mins_per_week: 120.0,
            diet_score: 7.0,

            literacy_mother_tongue: 8.0,
            literacy_english: 6.0,
            cognitive_test_score_pct: 60.0,
            growth_mindset: 7.0,
            design_thinking_score: 6.0,
            ikigai_competence: 5.0,
            entrepreneurial_skill: 4.0,

            psych_wellbeing: 6.0,
            h_health_domain: 7.0,
            h_education_domain: 6.0,
            time_use: 5.0,
            cultural_resilience: 5.0,
            good_governance: 4.0,
            community_vitality: 6.0,
            ecological_connection: 4.0,
            living_standards: 5.0,

            monthly_co2e_kg: 200.0,
            group_emissions_kg: 1000.0,
            positive_actions_count: 2.0,
            planetary_boundary_score: 6.0,
        }
    }
}

impl RawAssessment {
    /// Mutable handle on a numeric field by its wire name.
    pub(crate) fn number_mut(&mut self, name: &str) -> Option<&mut f64> {
        let slot = match name {
            "hba1c" => &mut self.hba1c,
            "systolicBP" => &mut self.systolic_bp,
            "phq9" => &mut self.phq9,
            "expectQualityLater" => &mut self.expect_quality_later,
            "geneticRiskScorePct" => &mut self.genetic_risk_score_pct,
            "exerciseMinsPerWeek" => &mut self.exercise_mins_per_week,
            "dietScore" => &mut self.diet_score,
            "literacyMotherTongue" => &mut self.literacy_mother_tongue,
            "literacyEnglish" => &mut self.literacy_english,
            "cognitiveTestScorePct" => &mut self.cognitive_test_score_pct,
            "growthMindset" => &mut self.growth_mindset,
            "designThinkingScore" => &mut self.design_thinking_score,
            "ikigaiCompetence" => &mut self.ikigai_competence,
            "entrepreneurialSkill" => &mut self.entrepreneurial_skill,
            "psychWellbeing" => &mut self.psych_wellbeing,
            "hHealthDomain" => &mut self.h_health_domain,
            "hEducationDomain" => &mut self.h_education_domain,
            "timeUse" => &mut self.time_use,
            "culturalResilience" => &mut self.cultural_resilience,
            "goodGovernance" => &mut self.good_governance,
            "communityVitality" => &mut self.community_vitality,
            "ecologicalConnection" => &mut self.ecological_connection,
            "livingStandards" => &mut self.living_standards,
            "monthlyCO2eKg" => &mut self.monthly_co2e_kg,
            "groupEmissionsKg" => &mut self.group_emissions_kg,
            "positiveActionsCount" => &mut self.positive_actions_count,
            "planetaryBoundaryScore" => &mut self.planetary_boundary_score,
            _ => return None,
        };
        Some(slot)
    }

    pub(crate) fn flag_mut(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "hasRecentCheckup" => Some(&mut self.has_recent_checkup),
            "hasGeneticRiskKnown" => Some(&mut self.has_genetic_risk_known),
            _ => None,
        }
    }
}

/// A single edited value coming from a form control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
}

impl FieldValue {
    pub fn kind_label(&self) -> &'static str {
        match self {
            FieldValue::Flag(_) => "flag",
            FieldValue::Number(_) => "number",
        }
    }
}

/// Value shape of a registered field. Number bounds describe the slider range shown to
/// the user; they are not enforced when a value is edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Flag,
    Number { min: f64, max: Option<f64> },
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Flag => "flag",
            FieldKind::Number { .. } => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub stage: Stage,
    pub kind: FieldKind,
}

const fn flag(name: &'static str, stage: Stage) -> FieldSpec {
    FieldSpec {
        name,
        stage,
        kind: FieldKind::Flag,
    }
}

const fn number(name: &'static str, stage: Stage, min: f64, max: f64) -> FieldSpec {
    FieldSpec {
        name,
        stage,
        kind: FieldKind::Number {
            min,
            max: Some(max),
        },
    }
}

const fn open_number(name: &'static str, stage: Stage) -> FieldSpec {
    FieldSpec {
        name,
        stage,
        kind: FieldKind::Number {
            min: 0.0,
            max: None,
        },
    }
}

/// Every editable field, in questionnaire order.
pub const FIELDS: &[FieldSpec] = &[
    flag("hasRecentCheckup", Stage::Health),
    number("hba1c", Stage::Health, 3.0, 15.0),
    number("systolicBP", Stage::Health, 40.0, 260.0),
    number("phq9", Stage::Health, 0.0, 27.0),
    number("expectQualityLater", Stage::Health, 0.0, 10.0),
    flag("hasGeneticRiskKnown", Stage::Health),
    number("geneticRiskScorePct", Stage::Health, 0.0, 100.0),
    open_number("exerciseMinsPerWeek", Stage::Health),
    number("dietScore", Stage::Health, 0.0, 10.0),
    number("literacyMotherTongue", Stage::Education, 0.0, 10.0),
    number("literacyEnglish", Stage::Education, 0.0, 10.0),
    number("cognitiveTestScorePct", Stage::Education, 0.0, 100.0),
    number("growthMindset", Stage::Education, 0.0, 10.0),
    number("designThinkingScore", Stage::Education, 0.0, 10.0),
    number("ikigaiCompetence", Stage::Education, 0.0, 10.0),
    number("entrepreneurialSkill", Stage::Education, 0.0, 10.0),
    number("psychWellbeing", Stage::Happiness, 0.0, 10.0),
    number("hHealthDomain", Stage::Happiness, 0.0, 10.0),
    number("hEducationDomain", Stage::Happiness, 0.0, 10.0),
    number("timeUse", Stage::Happiness, 0.0, 10.0),
    number("culturalResilience", Stage::Happiness, 0.0, 10.0),
    number("goodGovernance", Stage::Happiness, 0.0, 10.0),
    number("communityVitality", Stage::Happiness, 0.0, 10.0),
    number("ecologicalConnection", Stage::Happiness, 0.0, 10.0),
    number("livingStandards", Stage::Happiness, 0.0, 10.0),
    open_number("monthlyCO2eKg", Stage::Environment),
    open_number("groupEmissionsKg", Stage::Environment),
    number("positiveActionsCount", Stage::Environment, 0.0, 50.0),
    number("planetaryBoundaryScore", Stage::Environment, 0.0, 10.0),
];

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

/// Rejected `apply_edit` calls. The raw record is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("unknown assessment field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' expects a {expected} value, got a {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl RawAssessment {
    /// Write one field through the registry.
    pub fn apply_edit(&mut self, name: &str, value: FieldValue) -> Result<(), EditError> {
        let spec = field_spec(name).ok_or_else(|| EditError::UnknownField(name.to_string()))?;

        match (spec.kind, value) {
            (FieldKind::Flag, FieldValue::Flag(enabled)) => {
                let slot = self
                    .flag_mut(name)
                    .ok_or_else(|| EditError::UnknownField(name.to_string()))?;
                *slot = enabled;
                Ok(())
            }
            (FieldKind::Number { .. }, FieldValue::Number(amount)) => {
                let slot = self
                    .number_mut(name)
                    .ok_or_else(|| EditError::UnknownField(name.to_string()))?;
                *slot = amount;
                Ok(())
            }
            (kind, value) => Err(EditError::TypeMismatch {
                field: name.to_string(),
                expected: kind.label(),
                found: value.kind_label(),
            }),
        }
    }
}
