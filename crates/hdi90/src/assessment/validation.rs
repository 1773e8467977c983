use super::domain::{RawAssessment, Stage};

/// A single failed stage-advance rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationViolation {
    #[error("{label} must be greater than {min} and at most {max} (found {found})")]
    AboveZeroUpTo {
        field: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
    #[error("{label} must be between {min} and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
    #[error("{label} cannot be negative (found {found})")]
    Negative {
        field: &'static str,
        label: &'static str,
        found: f64,
    },
}

impl ValidationViolation {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationViolation::AboveZeroUpTo { field, .. }
            | ValidationViolation::OutOfRange { field, .. }
            | ValidationViolation::Negative { field, .. } => *field,
        }
    }
}

/// Advance refused; every failed rule for the stage is listed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot leave the {} stage: {}", .stage.label(), summarize(.violations))]
pub struct StageRejected {
    pub stage: Stage,
    pub violations: Vec<ValidationViolation>,
}

impl StageRejected {
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

fn summarize(violations: &[ValidationViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn above_zero_up_to(
    violations: &mut Vec<ValidationViolation>,
    field: &'static str,
    label: &'static str,
    found: f64,
    max: f64,
) {
    let accepted = found > 0.0 && found <= max;
    if !accepted {
        violations.push(ValidationViolation::AboveZeroUpTo {
            field,
            label,
            min: 0.0,
            max,
            found,
        });
    }
}

fn within(
    violations: &mut Vec<ValidationViolation>,
    field: &'static str,
    label: &'static str,
    found: f64,
    (min, max): (f64, f64),
) {
    if !(min..=max).contains(&found) {
        violations.push(ValidationViolation::OutOfRange {
            field,
            label,
            min,
            max,
            found,
        });
    }
}

fn non_negative(
    violations: &mut Vec<ValidationViolation>,
    field: &'static str,
    label: &'static str,
    found: f64,
) {
    let accepted = found >= 0.0;
    if !accepted {
        violations.push(ValidationViolation::Negative {
            field,
            label,
            found,
        });
    }
}

/// Collect every rule the stage's fields break. Happiness and Review have no rules.
pub fn validate_stage(stage: Stage, raw: &RawAssessment) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();

    match stage {
        Stage::Health => {
            above_zero_up_to(&mut violations, "hba1c", "HbA1c", raw.hba1c, 20.0);
            within(
                &mut violations,
                "systolicBP",
                "Systolic blood pressure",
                raw.systolic_bp,
                (40.0, 260.0),
            );
            within(&mut violations, "phq9", "PHQ-9", raw.phq9, (0.0, 27.0));
        }
        Stage::Education => {
            within(
                &mut violations,
                "cognitiveTestScorePct",
                "Cognitive test percentile",
                raw.cognitive_test_score_pct,
                (0.0, 100.0),
            );
        }
        Stage::Environment => {
            non_negative(
                &mut violations,
                "monthlyCO2eKg",
                "Monthly CO2e",
                raw.monthly_co2e_kg,
            );
            non_negative(
                &mut violations,
                "groupEmissionsKg",
                "Group emissions",
                raw.group_emissions_kg,
            );
            non_negative(
                &mut violations,
                "positiveActionsCount",
                "Positive actions",
                raw.positive_actions_count,
            );
        }
        Stage::Happiness | Stage::Review => {}
    }

    violations
}

pub fn check_stage(stage: Stage, raw: &RawAssessment) -> Result<(), StageRejected> {
    let violations = validate_stage(stage, raw);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(StageRejected { stage, violations })
    }
}
