use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use tower::ServiceExt;

use crate::insights::domain::{DocumentId, Metric};
use crate::insights::readings::ReadingSnapshot;
use crate::insights::router::{
    current_insights_handler, document_insights_handler, documents_handler, evaluate_handler,
    replace_readings_handler,
};
use crate::insights::insights_router;

#[tokio::test]
async fn current_insights_handler_memoizes_between_requests() {
    let store = shared_store(ReadingSnapshot::demo());

    let first = current_insights_handler(State(store.clone())).await;
    let second = current_insights_handler(State(store.clone())).await;

    assert_eq!(first.0.alerts, second.0.alerts);
    assert_eq!(first.0.severity_counts.warning, 1);
    assert_eq!(first.0.statuses.len(), 3);
    assert_eq!(
        store.lock().expect("insights store mutex poisoned").evaluations(),
        1
    );
}

#[tokio::test]
async fn evaluate_handler_leaves_stored_readings_untouched() {
    let store = shared_store(ReadingSnapshot::demo());
    let posted = ReadingSnapshot::default()
        .with(Metric::Ph, 8.4)
        .with(Metric::Ec, 5.2);

    let response = evaluate_handler(State(store.clone()), axum::Json(posted.clone())).await;

    assert_eq!(response.0.readings, posted);
    assert_eq!(response.0.alerts.len(), 4);
    let guard = store.lock().expect("insights store mutex poisoned");
    assert_eq!(guard.readings(), &ReadingSnapshot::demo());
    assert_eq!(guard.evaluations(), 0);
}

#[tokio::test]
async fn replace_readings_handler_reevaluates_store() {
    let store = shared_store(ReadingSnapshot::demo());
    let updated = ReadingSnapshot::demo().with(Metric::Ph, 7.0);

    let response =
        replace_readings_handler(State(store.clone()), axum::Json(updated.clone())).await;

    assert!(response.0.alerts.is_empty());
    assert_eq!(response.0.severity_counts.total(), 0);
    let guard = store.lock().expect("insights store mutex poisoned");
    assert_eq!(guard.readings(), &updated);
}

#[tokio::test]
async fn documents_handler_lists_catalog_in_order() {
    let store = shared_store(ReadingSnapshot::demo());

    let response = documents_handler(State(store)).await;

    let ids: Vec<_> = response.0.iter().map(|doc| doc.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            DocumentId::from("1"),
            DocumentId::from("2"),
            DocumentId::from("3")
        ]
    );
    assert_eq!(response.0[2].rule_count, 2);
}

#[tokio::test]
async fn document_insights_handler_returns_not_found_for_unknown_document() {
    let store = shared_store(ReadingSnapshot::demo());

    let response = document_insights_handler(State(store), Path("missing".to_string()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .contains("missing"));
}

#[tokio::test]
async fn document_insights_route_returns_bucket() {
    let router = insights_router(shared_store(ReadingSnapshot::demo()));

    let response = router
        .oneshot(
            Request::get("/api/v1/documents/1/insights")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], json!("1"));
    assert_eq!(payload["alerts"][0]["id"], json!("1-ph-low"));
    assert_eq!(payload["alerts"][0]["severity"], json!("warning"));
    assert_eq!(payload["recommendations"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn evaluate_route_accepts_partial_readings() {
    let router = insights_router(shared_store(ReadingSnapshot::demo()));

    let response = router
        .oneshot(
            Request::post("/api/v1/insights/evaluate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "ph": 8.4 })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ids: Vec<_> = payload["alerts"]
        .as_array()
        .expect("alerts array")
        .iter()
        .filter_map(|alert| alert["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "1-ph-band-alkaline (measured in study)",
            "2-ph-band-strongly alkaline (chestnut soil baseline in study)",
            "3-ph-high",
        ]
    );
    assert!(payload["by_document"]["3"]["recommendations"].is_array());
}

#[tokio::test]
async fn readings_route_rejects_unknown_metrics() {
    let router = insights_router(shared_store(ReadingSnapshot::demo()));

    let response = router
        .oneshot(
            Request::put("/api/v1/readings")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "salinity": 3.0 })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert!(response.status().is_client_error());
}
