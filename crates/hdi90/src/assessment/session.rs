use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::domain::{EditError, FieldValue, RawAssessment, Stage};
use super::report::ScoreCard;
use super::scoring::{HdiScores, ScoreEngine, ScoreOutcome};
use super::storage::{AssessmentDraft, DraftStore, DRAFT_KEY};
use super::validation::{check_stage, StageRejected};

/// Callback fired with fresh scores whenever an edit changes them.
pub type ScoreListener = Box<dyn Fn(&HdiScores) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the raw answers and wizard position, persists a draft after every change, and
/// recomputes scores on demand.
///
/// Storage faults are logged and swallowed; the session keeps working in memory.
pub struct AssessmentSession<S> {
    store: Arc<S>,
    engine: ScoreEngine,
    assessment: RawAssessment,
    stage: Stage,
    last_scores: HdiScores,
    listeners: Vec<(SubscriptionId, ScoreListener)>,
    next_subscription: u64,
}

impl<S> AssessmentSession<S>
where
    S: DraftStore + 'static,
{
    /// Open the session, restoring the draft stored under [`DRAFT_KEY`] if there is one.
    pub fn open(store: Arc<S>, engine: ScoreEngine) -> Self {
        let draft = load_draft(store.as_ref(), DRAFT_KEY);
        let last_scores = engine.score(&draft.assessment);

        Self {
            store,
            engine,
            assessment: draft.assessment,
            stage: draft.stage,
            last_scores,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn assessment(&self) -> &RawAssessment {
        &self.assessment
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    /// Always recomputed from the current answers.
    pub fn scores(&self) -> HdiScores {
        self.engine.score(&self.assessment)
    }

    pub fn evaluate(&self) -> ScoreOutcome {
        self.engine.evaluate(&self.assessment)
    }

    pub fn score_card(&self) -> ScoreCard {
        ScoreCard::from_scores(&self.scores())
    }

    pub fn draft(&self) -> AssessmentDraft {
        AssessmentDraft::new(self.assessment.clone(), self.stage)
    }

    /// Edit one field by name. Range checks wait until `advance`.
    pub fn apply_edit(&mut self, field: &str, value: FieldValue) -> Result<HdiScores, EditError> {
        self.assessment.apply_edit(field, value)?;
        debug!(field, ?value, stage = self.stage.number(), "assessment field edited");
        Ok(self.after_change())
    }

    /// Swap in a whole record, e.g. when a slider calculator pushes its state.
    pub fn replace(&mut self, assessment: RawAssessment) -> HdiScores {
        self.assessment = assessment;
        self.after_change()
    }

    /// Validate the current stage and move forward. Review stays at Review.
    pub fn advance(&mut self) -> Result<Stage, StageRejected> {
        if let Err(rejected) = check_stage(self.stage, &self.assessment) {
            warn!(
                stage = self.stage.number(),
                violations = rejected.violations.len(),
                "stage advance rejected"
            );
            return Err(rejected);
        }

        if let Some(next) = self.stage.next() {
            debug!(from = self.stage.number(), to = next.number(), "stage advanced");
            self.stage = next;
            self.persist();
        }
        Ok(self.stage)
    }

    /// Step back without validation. Health stays at Health.
    pub fn retreat(&mut self) -> Stage {
        if let Some(previous) = self.stage.previous() {
            debug!(from = self.stage.number(), to = previous.number(), "stage retreated");
            self.stage = previous;
            self.persist();
        }
        self.stage
    }

    /// Restore defaults, return to Health, and drop the stored draft.
    pub fn reset(&mut self) {
        self.assessment = RawAssessment::default();
        self.stage = Stage::Health;

        if let Err(err) = self.store.delete(DRAFT_KEY) {
            warn!(error = %err, key = DRAFT_KEY, "failed to clear assessment draft");
        }

        self.notify_if_changed();
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&HdiScores) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn after_change(&mut self) -> HdiScores {
        self.persist();
        self.notify_if_changed()
    }

    fn notify_if_changed(&mut self) -> HdiScores {
        let scores = self.scores();
        if scores != self.last_scores {
            debug!(hdi20 = scores.hdi20, "scores recomputed");
            self.last_scores = scores;
            for (_, listener) in &self.listeners {
                listener(&scores);
            }
        }
        scores
    }

    fn persist(&self) {
        let mut draft = self.draft();
        draft.saved_at = Some(Utc::now());

        let result = draft
            .to_bytes()
            .and_then(|bytes| self.store.set(DRAFT_KEY, &bytes));
        if let Err(err) = result {
            warn!(error = %err, key = DRAFT_KEY, "failed to persist assessment draft");
        }
    }
}

fn load_draft<S: DraftStore + ?Sized>(store: &S, key: &str) -> AssessmentDraft {
    match store.get(key) {
        Ok(Some(bytes)) => match AssessmentDraft::from_bytes(&bytes) {
            Ok(draft) => {
                debug!(key, stage = draft.stage.number(), "restored assessment draft");
                draft
            }
            Err(err) => {
                warn!(error = %err, key, "discarding unreadable assessment draft");
                AssessmentDraft::default()
            }
        },
        Ok(None) => AssessmentDraft::default(),
        Err(err) => {
            warn!(error = %err, key, "failed to read assessment draft");
            AssessmentDraft::default()
        }
    }
}
