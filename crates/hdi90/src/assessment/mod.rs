//! Guided HDI 2.0 self-assessment: raw answers, stage validation, draft persistence,
//! and the scoring engine that turns answers into the aggregate index.

pub mod domain;
pub mod report;
pub mod router;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    field_spec, EditError, FieldKind, FieldSpec, FieldValue, InvalidStage, RawAssessment, Stage,
    FIELDS,
};
pub use report::{focus_domain, round_display, ScoreCard};
pub use router::{assessment_router, AssessmentApi, FieldEdit, SessionView, SharedSession};
pub use scoring::{
    geometric_mean, normalize, Domain, HdiScores, ScoreComponent, ScoreEngine, ScoreOutcome,
    ScoringConfig, EPSILON,
};
pub use session::{AssessmentSession, ScoreListener, SubscriptionId};
pub use storage::{
    AssessmentDraft, DraftStore, FileDraftStore, InMemoryDraftStore, StorageError, DRAFT_KEY,
};
pub use validation::{check_stage, validate_stage, StageRejected, ValidationViolation};
