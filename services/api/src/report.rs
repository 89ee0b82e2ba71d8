use crate::infra::{load_catalog, load_cli_config};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use soil_insights::error::AppError;
use soil_insights::insights::router::InsightsResponse;
use soil_insights::insights::{
    ranges, CatalogError, CatalogIssue, DocumentCatalog, DocumentId, InsightsEngine,
    InsightsResult, Metric, ReadingHistory, ReadingSnapshot, SourceDocument,
};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Args, Debug, Default)]
pub(crate) struct InsightsReportArgs {
    /// Sensor export whose most recent row supplies the readings
    #[arg(long)]
    pub(crate) readings_csv: Option<PathBuf>,
    /// Soil temperature in °C
    #[arg(long)]
    pub(crate) temperature: Option<f64>,
    /// Soil moisture in %
    #[arg(long)]
    pub(crate) moisture: Option<f64>,
    /// Soil pH
    #[arg(long)]
    pub(crate) ph: Option<f64>,
    /// Electrical conductivity in dS/m
    #[arg(long)]
    pub(crate) ec: Option<f64>,
    /// Document catalog JSON (defaults to APP_CATALOG_PATH, then the research catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Only report on this document id
    #[arg(long)]
    pub(crate) document: Option<String>,
    /// Print the evaluation as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl InsightsReportArgs {
    fn overrides(&self) -> ReadingSnapshot {
        let mut snapshot = ReadingSnapshot::default();
        snapshot.set(Metric::Temperature, self.temperature);
        snapshot.set(Metric::Moisture, self.moisture);
        snapshot.set(Metric::Ph, self.ph);
        snapshot.set(Metric::Ec, self.ec);
        snapshot
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Document catalog JSON (defaults to APP_CATALOG_PATH, then the research catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadingSource {
    Flags,
    History(NaiveDateTime),
    Demo,
}

/// Flags win over the latest CSV row. Without any input the demo snapshot is used.
fn resolve_readings(
    args: &InsightsReportArgs,
) -> Result<(ReadingSnapshot, ReadingSource), AppError> {
    let overrides = args.overrides();

    if let Some(path) = &args.readings_csv {
        let history = ReadingHistory::from_path(path)?;
        if let Some(latest) = history.latest() {
            let snapshot = overrides.or(&latest.snapshot);
            return Ok((snapshot, ReadingSource::History(latest.recorded_at)));
        }
        warn!(path = %path.display(), "reading history is empty");
    }

    if overrides.measured().next().is_some() {
        Ok((overrides, ReadingSource::Flags))
    } else {
        Ok((ReadingSnapshot::demo(), ReadingSource::Demo))
    }
}

/// Narrows a result to the alerts and guidance of one document.
fn restrict_to_document(
    catalog: &DocumentCatalog,
    result: InsightsResult,
    id: &DocumentId,
) -> Result<InsightsResult, AppError> {
    if catalog.get(id).is_none() {
        return Err(AppError::DocumentNotFound(id.clone()));
    }

    let InsightsResult {
        alerts,
        mut by_document,
    } = result;
    by_document.retain(|key, _| key == id);

    Ok(InsightsResult {
        alerts: alerts
            .into_iter()
            .filter(|alert| &alert.source_document_id == id)
            .collect(),
        by_document,
    })
}

pub(crate) fn run_insights_report(args: InsightsReportArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let catalog_path = args.catalog.clone().or(config.catalog.path);
    let catalog = load_catalog(catalog_path.as_deref())?;
    let (readings, source) = resolve_readings(&args)?;

    let engine = InsightsEngine::new(catalog);
    let mut result = engine.evaluate(&readings);
    if let Some(id) = &args.document {
        result = restrict_to_document(engine.catalog(), result, &DocumentId::new(id.as_str()))?;
    }

    if args.json {
        let response = InsightsResponse::new(&readings, &result);
        let rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_report(engine.catalog(), &readings, source, &result);
    }

    Ok(())
}

/// Loads the catalog to check together with the name it is reported under.
fn catalog_for_validation(path: Option<&Path>) -> (String, Result<DocumentCatalog, CatalogError>) {
    match path {
        Some(path) => (path.display().to_string(), DocumentCatalog::from_path(path)),
        None => {
            let catalog = DocumentCatalog::research();
            let checked = catalog.validate().map(|()| catalog);
            ("built-in research catalog".to_string(), checked)
        }
    }
}

fn issue_listing(label: &str, issues: &[CatalogIssue]) -> Vec<String> {
    let mut lines = vec![format!("{label} has {} issue(s):", issues.len())];
    lines.extend(issues.iter().map(|issue| format!("- {issue}")));
    lines
}

pub(crate) fn run_catalog_validate(args: CatalogArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let path = args.catalog.or(config.catalog.path);
    let (label, checked) = catalog_for_validation(path.as_deref());

    match checked {
        Ok(catalog) => {
            let rules: usize = catalog
                .documents()
                .iter()
                .map(|document| document.rules.len())
                .sum();
            println!("{label} OK: {} documents, {rules} rules", catalog.len());
            Ok(())
        }
        Err(CatalogError::Validation(issues)) => {
            warn!(catalog = %label, issues = issues.len(), "catalog failed validation");
            for line in issue_listing(&label, &issues) {
                println!("{line}");
            }
            Err(CatalogError::Validation(issues).into())
        }
        Err(err) => Err(err.into()),
    }
}

fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Temperature => format!("{value:.1} °C"),
        Metric::Moisture => format!("{value:.0}%"),
        Metric::Ph => format!("{value:.2}"),
        Metric::Ec => format!("{value:.2} dS/m"),
    }
}

fn document_heading(document: &SourceDocument) -> String {
    match document.year {
        Some(year) => format!("{} ({year})", document.title),
        None => document.title.clone(),
    }
}

fn render_report(
    catalog: &DocumentCatalog,
    readings: &ReadingSnapshot,
    source: ReadingSource,
    result: &InsightsResult,
) {
    println!(
        "Soil insights report (generated {})",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    match source {
        ReadingSource::History(recorded_at) => {
            println!("Readings: sensor export, recorded {recorded_at}")
        }
        ReadingSource::Flags => println!("Readings: command line"),
        ReadingSource::Demo => println!("Readings: demo snapshot (no input provided)"),
    }

    println!("\nCurrent readings");
    for metric in Metric::ordered() {
        match readings.get(metric) {
            Some(value) => println!(
                "- {}: {}",
                metric.default_label(),
                format_value(metric, value)
            ),
            None => println!("- {}: not measured", metric.default_label()),
        }
    }
    let nutrients = &readings.nutrients;
    if !nutrients.is_empty() {
        let show =
            |value: Option<f64>| value.map_or("-".to_string(), |value| format!("{value:.0}"));
        println!(
            "- NPK: N {} | P {} | K {} mg/kg",
            show(nutrients.nitrogen),
            show(nutrients.phosphorus),
            show(nutrients.potassium)
        );
    }

    let statuses = ranges::out_of_range(readings);
    if statuses.is_empty() {
        println!("\nSensor ranges: all normal");
    } else {
        println!("\nSensor ranges");
        for status in &statuses {
            println!(
                "- [{}] {} ({}): {}",
                status.level.label(),
                status.message,
                format_value(status.metric, status.value),
                status.recommendation
            );
        }
    }

    let counts = result.severity_counts();
    if result.alerts.is_empty() {
        println!("\nAlerts: none");
    } else {
        println!(
            "\nAlerts ({} critical, {} warning, {} info)",
            counts.critical, counts.warning, counts.info
        );
        for alert in &result.alerts {
            println!(
                "- [{}] {} ({}), source: {}",
                alert.severity.label(),
                alert.title,
                format_value(alert.metric, alert.value),
                alert.source_document_title
            );
        }
    }

    for (id, bucket) in &result.by_document {
        if bucket.recommendations.is_empty() {
            continue;
        }
        let heading = catalog
            .get(id)
            .map(document_heading)
            .unwrap_or_else(|| id.to_string());
        println!("\nRecommendations: {heading}");
        for recommendation in &bucket.recommendations {
            println!("- {recommendation}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_readings() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../crates/soil-insights/data/field_readings.csv")
    }

    #[test]
    fn builtin_catalog_is_checked_under_its_own_name() {
        let (label, checked) = catalog_for_validation(None);

        assert_eq!(label, "built-in research catalog");
        assert_eq!(checked.expect("research catalog is valid").len(), 3);
    }

    #[test]
    fn invalid_catalog_file_lists_every_issue() {
        let path = std::env::temp_dir().join(format!(
            "soil-insights-invalid-catalog-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[
                { "id": "x", "title": "t", "source": "s",
                  "rules": [{ "metric": "ec", "bands": [{ "name": "open" }] }] },
                { "id": "x", "title": "t", "source": "s" }
            ]"#,
        )
        .expect("fixture written");

        let (label, checked) = catalog_for_validation(Some(path.as_path()));
        std::fs::remove_file(&path).expect("fixture removed");

        let issues = match checked {
            Err(CatalogError::Validation(issues)) => issues,
            other => panic!("expected validation failure, got {other:?}"),
        };
        let lines = issue_listing(&label, &issues);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{} has 2 issue(s):", path.display()));
        assert_eq!(
            lines[1],
            "- document x: band 'open' on ec has neither min nor max"
        );
        assert_eq!(lines[2], "- document x is listed more than once");
    }

    #[test]
    fn demo_snapshot_is_used_without_inputs() {
        let (readings, source) =
            resolve_readings(&InsightsReportArgs::default()).expect("readings resolve");

        assert_eq!(source, ReadingSource::Demo);
        assert_eq!(readings, ReadingSnapshot::demo());
    }

    #[test]
    fn flags_alone_give_a_sparse_snapshot() {
        let args = InsightsReportArgs {
            ph: Some(8.4),
            ..InsightsReportArgs::default()
        };

        let (readings, source) = resolve_readings(&args).expect("readings resolve");

        assert_eq!(source, ReadingSource::Flags);
        assert_eq!(readings.ph, Some(8.4));
        assert!(readings.moisture.is_none());
    }

    #[test]
    fn flags_override_latest_history_row() {
        let args = InsightsReportArgs {
            readings_csv: Some(field_readings()),
            ph: Some(6.9),
            ..InsightsReportArgs::default()
        };

        let (readings, source) = resolve_readings(&args).expect("readings resolve");

        assert!(matches!(source, ReadingSource::History(_)));
        assert_eq!(readings.ph, Some(6.9));
        assert_eq!(readings.ec, Some(1.4));
        assert_eq!(readings.nutrients.potassium, Some(204.0));
    }

    #[test]
    fn restricting_to_unknown_document_fails() {
        let catalog = DocumentCatalog::research();
        let result = InsightsEngine::new(catalog.clone()).evaluate(&ReadingSnapshot::demo());

        let err = restrict_to_document(&catalog, result, &DocumentId::from("42"))
            .expect_err("unknown document");

        assert!(matches!(err, AppError::DocumentNotFound(id) if id.as_str() == "42"));
    }

    #[test]
    fn restricting_keeps_only_one_document() {
        let catalog = DocumentCatalog::research();
        let readings = ReadingSnapshot::default()
            .with(Metric::Ph, 8.4)
            .with(Metric::Ec, 5.2);
        let result = InsightsEngine::new(catalog.clone()).evaluate(&readings);

        let rice = restrict_to_document(&catalog, result, &DocumentId::from("3"))
            .expect("rice document");

        assert_eq!(rice.alerts.len(), 2);
        assert_eq!(rice.by_document.len(), 1);
        assert!(rice
            .alerts
            .iter()
            .all(|alert| alert.source_document_id.as_str() == "3"));
    }
}
