use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::RawAssessment;
use crate::assessment::scoring::{HdiScores, ScoreEngine};
use crate::assessment::session::AssessmentSession;
use crate::assessment::storage::{DraftStore, InMemoryDraftStore, StorageError, DRAFT_KEY};

pub(super) const TOLERANCE: f64 = 1e-6;

pub(super) const DEFAULT_AAROGYA_SHREE: f64 = 0.628_941_798_941_799;
pub(super) const DEFAULT_EDUCATION_SCORE: f64 = 0.568;
pub(super) const DEFAULT_HAPPINESS_SCORE: f64 = 0.535;
pub(super) const DEFAULT_NET_IMPACT: f64 = 0.640_491_260_478_083_2;
pub(super) const DEFAULT_HDI20: f64 = 0.591_502_311_476_964_1;

pub(super) fn engine() -> ScoreEngine {
    ScoreEngine::default()
}

pub(super) fn assert_close(actual: f64, expected: f64, label: &str) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{label}: expected {expected}, got {actual}"
    );
}

pub(super) fn assert_in_unit_floor(scores: &HdiScores) {
    for value in scores.domains().into_iter().chain([scores.hdi20]) {
        assert!(
            (crate::assessment::scoring::EPSILON..=1.0).contains(&value),
            "score {value} outside [epsilon, 1] in {scores:?}"
        );
    }
}

/// A record with every numeric answer set to `value` and both flags set to `flags`.
pub(super) fn uniform_assessment(value: f64, flags: bool) -> RawAssessment {
    RawAssessment {
        has_recent_checkup: flags,
        hba1c: value,
        systolic_bp: value,
        phq9: value,
        expect_quality_later: value,
        has_genetic_risk_known: flags,
        genetic_risk_score_pct: value,
        exercise_mins_per_week: value,
        diet_score: value,
        literacy_mother_tongue: value,
        literacy_english: value,
        cognitive_test_score_pct: value,
        growth_mindset: value,
        design_thinking_score: value,
        ikigai_competence: value,
        entrepreneurial_skill: value,
        psych_wellbeing: value,
        h_health_domain: value,
        h_education_domain: value,
        time_use: value,
        cultural_resilience: value,
        good_governance: value,
        community_vitality: value,
        ecological_connection: value,
        living_standards: value,
        monthly_co2e_kg: value,
        group_emissions_kg: value,
        positive_actions_count: value,
        planetary_boundary_score: value,
    }
}

pub(super) fn memory_session() -> (AssessmentSession<InMemoryDraftStore>, Arc<InMemoryDraftStore>) {
    let store = Arc::new(InMemoryDraftStore::default());
    let session = AssessmentSession::open(store.clone(), engine());
    (session, store)
}

pub(super) fn stored_draft(store: &InMemoryDraftStore) -> Option<Value> {
    store
        .get(DRAFT_KEY)
        .expect("in-memory store readable")
        .map(|bytes| serde_json::from_slice(&bytes).expect("draft is json"))
}

/// Store whose every call fails, standing in for disabled browser storage.
pub(super) struct UnavailableDraftStore;

impl DraftStore for UnavailableDraftStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _bytes: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
