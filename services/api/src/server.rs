use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredDraftStore};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hdi90::assessment::{AssessmentApi, AssessmentSession, ScoreEngine};
use hdi90::config::AppConfig;
use hdi90::error::AppError;
use hdi90::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(ConfiguredDraftStore::from_config(&config.drafts));
    let drafts = store.describe();
    let mut session = AssessmentSession::open(store, ScoreEngine::default());
    session.subscribe(|scores| {
        info!(
            hdi20 = scores.hdi20,
            aarogya_shree = scores.aarogya_shree,
            education = scores.education_score,
            happiness = scores.happiness_score,
            net_impact = scores.net_impact,
            "assessment scores updated"
        );
    });

    let app = with_assessment_routes(AssessmentApi::new(session))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %drafts, "hdi90 assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
