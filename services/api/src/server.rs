use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use soil_insights::config::AppConfig;
use soil_insights::error::AppError;
use soil_insights::insights::{InsightsStore, ReadingSnapshot};
use soil_insights::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = load_catalog(config.catalog.path.as_deref())?;
    let documents = catalog.len();
    let store = Arc::new(Mutex::new(InsightsStore::new(
        catalog,
        ReadingSnapshot::demo(),
    )));

    let app = with_service_routes(store)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, documents, "soil insights service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
