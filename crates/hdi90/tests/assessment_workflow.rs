//! End-to-end wizard scenarios through the public session facade and a file-backed draft
//! store, mirroring how the service and CLI drive the engine.

use std::sync::{Arc, Mutex};

use hdi90::assessment::{
    AssessmentSession, DraftStore, FieldValue, FileDraftStore, RawAssessment, ScoreCard,
    ScoreEngine, Stage, DRAFT_KEY,
};

fn open(store: Arc<FileDraftStore>) -> AssessmentSession<FileDraftStore> {
    AssessmentSession::open(store, ScoreEngine::default())
}

#[test]
fn completing_the_wizard_survives_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FileDraftStore::new(dir.path()));

    {
        let mut session = open(store.clone());
        session
            .apply_edit("hba1c", FieldValue::Number(5.1))
            .expect("health edit");
        session
            .apply_edit("exerciseMinsPerWeek", FieldValue::Number(240.0))
            .expect("health edit");
        assert_eq!(session.advance().expect("health valid"), Stage::Education);

        session
            .apply_edit("literacyEnglish", FieldValue::Number(9.0))
            .expect("education edit");
        assert_eq!(session.advance().expect("education valid"), Stage::Happiness);
    }

    let mut session = open(store.clone());
    assert_eq!(session.stage(), Stage::Happiness);
    assert_eq!(session.assessment().hba1c, 5.1);
    assert_eq!(session.assessment().literacy_english, 9.0);

    assert_eq!(session.advance().expect("happiness has no rules"), Stage::Environment);
    assert_eq!(session.advance().expect("environment valid"), Stage::Review);

    let card = ScoreCard::from_scores(&session.scores());
    let defaults = ScoreCard::from_scores(&ScoreEngine::default().score(&RawAssessment::default()));
    assert!(card.education_score > defaults.education_score);
    assert!(card.aarogya_shree > defaults.aarogya_shree);

    session.reset();
    assert!(store.get(DRAFT_KEY).expect("store readable").is_none());
    assert!(!dir.path().join("hdi2_wizard_v1.json").exists());
}

#[test]
fn rejected_advance_reports_every_problem_and_keeps_answers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = open(Arc::new(FileDraftStore::new(dir.path())));

    session
        .apply_edit("systolicBP", FieldValue::Number(20.0))
        .expect("edit accepted");
    session
        .apply_edit("phq9", FieldValue::Number(28.0))
        .expect("edit accepted");

    let rejected = session.advance().expect_err("two health violations");
    let messages = rejected.messages();

    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("Systolic blood pressure"));
    assert!(messages[1].contains("PHQ-9"));
    assert_eq!(session.stage(), Stage::Health);
    assert_eq!(session.assessment().systolic_bp, 20.0);
}

#[test]
fn slider_calculator_mirrors_scores_through_a_listener() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = open(Arc::new(FileDraftStore::new(dir.path())));
    let mirrored = Arc::new(Mutex::new(Vec::new()));

    {
        let mirrored = mirrored.clone();
        session.subscribe(move |scores| {
            mirrored
                .lock()
                .expect("mirror mutex")
                .push(ScoreCard::from_scores(scores));
        });
    }

    session
        .apply_edit("planetaryBoundaryScore", FieldValue::Number(9.0))
        .expect("edit accepted");
    session
        .apply_edit("positiveActionsCount", FieldValue::Number(12.0))
        .expect("edit accepted");

    let mirrored = mirrored.lock().expect("mirror mutex");
    assert_eq!(mirrored.len(), 2);
    assert!(mirrored[1].net_impact > mirrored[0].net_impact);
    assert_eq!(mirrored[1], ScoreCard::from_scores(&session.scores()));
}
