use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{FieldSpec, FieldValue, RawAssessment, Stage, FIELDS};
use super::report::ScoreCard;
use super::scoring::{HdiScores, ScoreComponent, ScoreEngine};
use super::session::AssessmentSession;
use super::storage::DraftStore;
use crate::error::AppError;

/// Session shared between request handlers.
pub type SharedSession<S> = Arc<Mutex<AssessmentSession<S>>>;

/// Router state: the shared wizard session plus a stateless engine for one-off scoring.
pub struct AssessmentApi<S> {
    pub session: SharedSession<S>,
    pub engine: ScoreEngine,
}

impl<S> Clone for AssessmentApi<S> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            engine: self.engine.clone(),
        }
    }
}

impl<S> AssessmentApi<S>
where
    S: DraftStore + 'static,
{
    pub fn new(session: AssessmentSession<S>) -> Self {
        let engine = session.engine().clone();
        Self {
            session: Arc::new(Mutex::new(session)),
            engine,
        }
    }
}

/// Snapshot of the wizard returned by every session endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub stage: Stage,
    pub stage_label: &'static str,
    pub assessment: RawAssessment,
    pub scores: HdiScores,
    pub card: ScoreCard,
}

impl SessionView {
    pub fn from_session<S>(session: &AssessmentSession<S>) -> Self
    where
        S: DraftStore + 'static,
    {
        let scores = session.scores();
        Self {
            stage: session.stage(),
            stage_label: session.stage().label(),
            assessment: session.assessment().clone(),
            scores,
            card: ScoreCard::from_scores(&scores),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub scores: HdiScores,
    pub card: ScoreCard,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldEdit {
    pub field: String,
    pub value: FieldValue,
}

/// Router builder exposing the calculator and the wizard session over HTTP.
pub fn assessment_router<S>(api: AssessmentApi<S>) -> Router
where
    S: DraftStore + 'static,
{
    Router::new()
        .route("/api/v1/hdi/score", post(score_handler::<S>))
        .route("/api/v1/hdi/fields", get(fields_handler))
        .route("/api/v1/hdi/session", get(session_handler::<S>))
        .route("/api/v1/hdi/session/fields", patch(edit_handler::<S>))
        .route("/api/v1/hdi/session/advance", post(advance_handler::<S>))
        .route("/api/v1/hdi/session/retreat", post(retreat_handler::<S>))
        .route("/api/v1/hdi/session/reset", post(reset_handler::<S>))
        .with_state(api)
}

fn lock<S>(session: &SharedSession<S>) -> Result<MutexGuard<'_, AssessmentSession<S>>, Response> {
    session
        .lock()
        .map_err(|_| AppError::Session("session lock poisoned".to_string()).into_response())
}

pub(crate) async fn score_handler<S>(
    State(api): State<AssessmentApi<S>>,
    Json(assessment): Json<RawAssessment>,
) -> Response
where
    S: DraftStore + 'static,
{
    let outcome = api.engine.evaluate(&assessment);
    let response = ScoreResponse {
        scores: outcome.scores,
        card: ScoreCard::from_scores(&outcome.scores),
        components: outcome.components,
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub(crate) async fn fields_handler() -> Json<&'static [FieldSpec]> {
    Json(FIELDS)
}

pub(crate) async fn session_handler<S>(State(api): State<AssessmentApi<S>>) -> Response
where
    S: DraftStore + 'static,
{
    match lock(&api.session) {
        Ok(session) => (StatusCode::OK, Json(SessionView::from_session(&session))).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn edit_handler<S>(
    State(api): State<AssessmentApi<S>>,
    Json(edit): Json<FieldEdit>,
) -> Response
where
    S: DraftStore + 'static,
{
    let mut session = match lock(&api.session) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match session.apply_edit(&edit.field, edit.value) {
        Ok(_) => (StatusCode::OK, Json(SessionView::from_session(&session))).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": edit.field,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn advance_handler<S>(State(api): State<AssessmentApi<S>>) -> Response
where
    S: DraftStore + 'static,
{
    let mut session = match lock(&api.session) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match session.advance() {
        Ok(_) => (StatusCode::OK, Json(SessionView::from_session(&session))).into_response(),
        Err(rejected) => {
            let payload = json!({
                "error": rejected.to_string(),
                "stage": rejected.stage,
                "violations": rejected.messages(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn retreat_handler<S>(State(api): State<AssessmentApi<S>>) -> Response
where
    S: DraftStore + 'static,
{
    let mut session = match lock(&api.session) {
        Ok(session) => session,
        Err(response) => return response,
    };

    session.retreat();
    (StatusCode::OK, Json(SessionView::from_session(&session))).into_response()
}

pub(crate) async fn reset_handler<S>(State(api): State<AssessmentApi<S>>) -> Response
where
    S: DraftStore + 'static,
{
    let mut session = match lock(&api.session) {
        Ok(session) => session,
        Err(response) => return response,
    };

    session.reset();
    (StatusCode::OK, Json(SessionView::from_session(&session))).into_response()
}
