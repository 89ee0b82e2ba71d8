use metrics_exporter_prometheus::PrometheusHandle;
use soil_insights::config::AppConfig;
use soil_insights::error::AppError;
use soil_insights::insights::DocumentCatalog;
use soil_insights::telemetry;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configuration for one-shot CLI commands, with logging installed the same
/// way the server does it.
pub(crate) fn load_cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

/// Loads and validates the catalog at `path`, or the built-in research
/// catalog when no path is configured.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<DocumentCatalog, AppError> {
    match path {
        Some(path) => {
            let catalog = DocumentCatalog::from_path(path)?;
            info!(path = %path.display(), documents = catalog.len(), "using document catalog");
            Ok(catalog)
        }
        None => {
            let catalog = DocumentCatalog::research();
            catalog.validate()?;
            Ok(catalog)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soil_insights::telemetry::TelemetryError;

    #[test]
    fn cli_config_installs_tracing_subscriber() {
        let config = load_cli_config().expect("cli config loads");

        assert!(matches!(
            telemetry::init(&config.telemetry),
            Err(TelemetryError::Subscriber(_))
        ));
    }

    #[test]
    fn falls_back_to_research_catalog() {
        let catalog = load_catalog(None).expect("research catalog loads");
        assert_eq!(catalog, DocumentCatalog::research());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let err = load_catalog(Some(Path::new("does/not/exist.json"))).expect_err("missing file");
        assert!(err.to_string().contains("catalog"));
    }
}
