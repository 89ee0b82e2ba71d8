use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::domain::DocumentId;
use super::ranges::{self, MetricStatus};
use super::readings::ReadingSnapshot;
use super::store::InsightsStore;
use super::views::{Alert, DocumentInsights, InsightsResult, SeverityCounts};
use crate::error::AppError;

pub type SharedInsightsStore = Arc<Mutex<InsightsStore>>;

/// Full evaluation payload returned by the insights endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    pub readings: ReadingSnapshot,
    pub severity_counts: SeverityCounts,
    pub alerts: Vec<Alert>,
    pub by_document: BTreeMap<DocumentId, DocumentInsights>,
    pub statuses: Vec<MetricStatus>,
}

impl InsightsResponse {
    pub fn new(readings: &ReadingSnapshot, result: &InsightsResult) -> Self {
        Self {
            readings: readings.clone(),
            severity_counts: result.severity_counts(),
            alerts: result.alerts.clone(),
            by_document: result.by_document.clone(),
            statuses: ranges::statuses(readings),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummaryView {
    pub id: DocumentId,
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    pub tags: Vec<String>,
    pub rule_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentInsightsView {
    pub id: DocumentId,
    pub title: String,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
}

/// Router exposing the shared store over HTTP.
pub fn insights_router(store: SharedInsightsStore) -> Router {
    Router::new()
        .route("/api/v1/insights", get(current_insights_handler))
        .route("/api/v1/insights/evaluate", post(evaluate_handler))
        .route(
            "/api/v1/readings",
            get(readings_handler).put(replace_readings_handler),
        )
        .route("/api/v1/documents", get(documents_handler))
        .route(
            "/api/v1/documents/:document_id/insights",
            get(document_insights_handler),
        )
        .with_state(store)
}

pub(crate) async fn current_insights_handler(
    State(store): State<SharedInsightsStore>,
) -> Json<InsightsResponse> {
    let mut guard = store.lock().expect("insights store mutex poisoned");
    let readings = guard.readings().clone();
    Json(InsightsResponse::new(&readings, guard.insights()))
}

/// Evaluates the posted readings without touching the stored snapshot.
pub(crate) async fn evaluate_handler(
    State(store): State<SharedInsightsStore>,
    Json(readings): Json<ReadingSnapshot>,
) -> Json<InsightsResponse> {
    let result = {
        let guard = store.lock().expect("insights store mutex poisoned");
        guard.engine().evaluate(&readings)
    };
    Json(InsightsResponse::new(&readings, &result))
}

pub(crate) async fn readings_handler(
    State(store): State<SharedInsightsStore>,
) -> Json<ReadingSnapshot> {
    let guard = store.lock().expect("insights store mutex poisoned");
    Json(guard.readings().clone())
}

pub(crate) async fn replace_readings_handler(
    State(store): State<SharedInsightsStore>,
    Json(readings): Json<ReadingSnapshot>,
) -> Json<InsightsResponse> {
    let mut guard = store.lock().expect("insights store mutex poisoned");
    guard.replace_readings(readings.clone());
    Json(InsightsResponse::new(&readings, guard.insights()))
}

pub(crate) async fn documents_handler(
    State(store): State<SharedInsightsStore>,
) -> Json<Vec<DocumentSummaryView>> {
    let guard = store.lock().expect("insights store mutex poisoned");
    let documents = guard
        .catalog()
        .documents()
        .iter()
        .map(|document| DocumentSummaryView {
            id: document.id.clone(),
            title: document.title.clone(),
            source: document.source.clone(),
            year: document.year,
            tags: document.tags.clone(),
            rule_count: document.rules.len(),
        })
        .collect();
    Json(documents)
}

pub(crate) async fn document_insights_handler(
    State(store): State<SharedInsightsStore>,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentInsightsView>, AppError> {
    let id = DocumentId::new(document_id);
    let mut guard = store.lock().expect("insights store mutex poisoned");
    let title = guard
        .catalog()
        .get(&id)
        .map(|document| document.title.clone())
        .ok_or_else(|| AppError::DocumentNotFound(id.clone()))?;
    let bucket = guard.insights().document(&id).cloned().unwrap_or_default();

    Ok(Json(DocumentInsightsView {
        id,
        title,
        alerts: bucket.alerts,
        recommendations: bucket.recommendations,
    }))
}
