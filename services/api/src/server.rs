use crate::cli::ServeArgs;
use crate::demo::demo_portfolio;
use crate::infra::{load_cases_from_path, triage_service, AppState};
use crate::routes::with_collections_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dca_triage::config::AppConfig;
use dca_triage::error::AppError;
use dca_triage::telemetry;
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

    let cases = match args.cases.take() {
        Some(path) => {
            let cases = load_cases_from_path(&path)?;
            info!(count = cases.len(), path = %path.display(), "case export loaded");
            cases
        }
        None => {
            info!("no case export supplied; serving the built-in demo portfolio");
            demo_portfolio()
        }
    };

    let service = Arc::new(triage_service(cases)?);

    let app = with_collections_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "collections triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
