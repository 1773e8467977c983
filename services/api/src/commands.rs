use clap::Args;
use hdi90::assessment::{
    AssessmentDraft, Domain, DraftStore, FileDraftStore, HdiScores, RawAssessment, ScoreCard,
    ScoreComponent, ScoreEngine, DRAFT_KEY,
};
use hdi90::config::{AppConfig, ConfigError};
use hdi90::error::AppError;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Assessment JSON file; missing fields use the documented defaults
    #[arg(long, default_value = "-")]
    pub(crate) input: PathBuf,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
    /// Include per-factor contributions
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DraftArgs {
    /// Draft directory (defaults to HDI_DRAFT_DIR)
    #[arg(long)]
    pub(crate) dir: Option<PathBuf>,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) scores: HdiScores,
    pub(crate) card: ScoreCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) components: Option<Vec<ScoreComponent>>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)?
    };

    let report = score_input(&raw, args.breakdown)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn score_input(raw: &str, breakdown: bool) -> Result<ScoreReport, AppError> {
    let assessment: RawAssessment = serde_json::from_str(raw)?;
    let outcome = ScoreEngine::default().evaluate(&assessment);

    Ok(ScoreReport {
        scores: outcome.scores,
        card: ScoreCard::from_scores(&outcome.scores),
        components: breakdown.then_some(outcome.components),
    })
}

pub(crate) fn render_report(report: &ScoreReport) -> String {
    let card = &report.card;
    let mut out = String::new();

    writeln!(out, "HDI 2.0 score card").expect("write title");
    for domain in Domain::ALL {
        let value = report.scores.domain(domain);
        writeln!(out, "  {:<16} {:.3}", domain.label(), value).expect("write domain score");
    }
    writeln!(out, "  {:<16} {:.3}", "HDI20", card.hdi20).expect("write hdi20");
    writeln!(out, "Focus: {}", card.focus_domain.label()).expect("write focus");

    if let Some(components) = &report.components {
        writeln!(out, "Breakdown:").expect("write breakdown header");
        for component in components {
            writeln!(
                out,
                "  {:<14} {:<24} weight {:.2} value {:.3}",
                component.domain.label(),
                component.factor,
                component.weight,
                component.value
            )
            .expect("write breakdown line");
        }
    }

    out
}

fn draft_store(dir: Option<PathBuf>) -> Result<FileDraftStore, AppError> {
    let directory = match dir {
        Some(dir) => dir,
        None => AppConfig::load()?
            .drafts
            .directory
            .ok_or(ConfigError::MissingDraftDir)?,
    };
    Ok(FileDraftStore::new(directory))
}

pub(crate) fn run_draft_show(args: DraftArgs) -> Result<(), AppError> {
    let store = draft_store(args.dir)?;

    let Some(bytes) = store.get(DRAFT_KEY)? else {
        println!("No draft stored in {}", store.directory().display());
        return Ok(());
    };

    let draft = AssessmentDraft::from_bytes(&bytes)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
    } else {
        print!("{}", render_draft(&draft));
    }
    Ok(())
}

pub(crate) fn render_draft(draft: &AssessmentDraft) -> String {
    let scores = ScoreEngine::default().score(&draft.assessment);
    let report = ScoreReport {
        scores,
        card: ScoreCard::from_scores(&scores),
        components: None,
    };

    let mut out = String::new();
    writeln!(
        out,
        "Draft at stage {} ({})",
        draft.stage.number(),
        draft.stage.label()
    )
    .expect("write draft header");
    if let Some(saved_at) = draft.saved_at {
        writeln!(out, "Saved {}", saved_at.to_rfc3339()).expect("write saved timestamp");
    }
    out.push_str(&render_report(&report));
    out
}

pub(crate) fn run_draft_reset(args: DraftArgs) -> Result<(), AppError> {
    let store = draft_store(args.dir)?;
    store.delete(DRAFT_KEY)?;
    println!("Cleared draft in {}", store.directory().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdi90::assessment::Stage;

    #[test]
    fn score_input_accepts_partial_assessments() {
        let report = score_input(r#"{"dietScore": 10, "unknownField": 1}"#, false)
            .expect("partial input scores");

        let defaults = ScoreEngine::default().score(&RawAssessment::default());
        assert!(report.scores.aarogya_shree > defaults.aarogya_shree);
        assert_eq!(report.scores.education_score, defaults.education_score);
        assert!(report.components.is_none());
    }

    #[test]
    fn score_input_rejects_malformed_json() {
        match score_input("{\"hba1c\": \"high\"}", false) {
            Err(AppError::Input(_)) => {}
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[test]
    fn text_report_lists_domains_and_breakdown() {
        let report = score_input("{}", true).expect("defaults score");
        let text = render_report(&report);

        assert!(text.contains("AarogyaShree     0.629"));
        assert!(text.contains("HDI20            0.592"));
        assert!(text.contains("Focus: HappinessScore"));
        assert!(text.contains("positive_actions"));
    }

    #[test]
    fn draft_summary_names_the_stage() {
        let draft = AssessmentDraft::new(RawAssessment::default(), Stage::Environment);
        let text = render_draft(&draft);
        assert!(text.starts_with("Draft at stage 4 (Environment)"));
    }

    #[test]
    fn explicit_directory_skips_configuration() {
        let store = draft_store(Some(PathBuf::from("/tmp/hdi90-drafts"))).expect("store");
        assert_eq!(store.directory(), std::path::Path::new("/tmp/hdi90-drafts"));
    }
}
