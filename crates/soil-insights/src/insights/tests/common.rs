use std::sync::{Arc, Mutex};

use crate::insights::domain::{
    Band, DocumentId, Metric, Rule, Severity, SourceDocument, Threshold,
};
use crate::insights::readings::ReadingSnapshot;
use crate::insights::router::SharedInsightsStore;
use crate::insights::{DocumentCatalog, InsightsStore};

pub(super) fn band(name: &str, min: Option<f64>, max: Option<f64>) -> Band {
    Band {
        name: name.to_string(),
        min,
        max,
        severity: None,
        recommendation: None,
    }
}

pub(super) fn guided_band(
    name: &str,
    min: Option<f64>,
    max: Option<f64>,
    severity: Severity,
    recommendation: &str,
) -> Band {
    Band {
        severity: Some(severity),
        recommendation: Some(recommendation.to_string()),
        ..band(name, min, max)
    }
}

pub(super) fn threshold_rule(metric: Metric, min: Option<f64>, max: Option<f64>) -> Rule {
    Rule {
        threshold: Threshold {
            min,
            max,
            ..Threshold::default()
        },
        ..Rule::new(metric)
    }
}

pub(super) fn document(id: &str, rules: Vec<Rule>) -> SourceDocument {
    SourceDocument {
        id: DocumentId::from(id),
        title: format!("Field study {id}"),
        source: format!("https://example.org/studies/{id}.pdf"),
        year: Some(2024),
        summary: None,
        tags: Vec::new(),
        static_recommendations: Vec::new(),
        rules,
    }
}

/// Single-document catalog with a neutral-pH rule that recommends lowering pH.
pub(super) fn neutral_ph_document() -> SourceDocument {
    let rule = Rule {
        threshold: Threshold {
            min: Some(6.5),
            max: Some(7.5),
            recommend_low: None,
            recommend_high: Some("lower pH".to_string()),
        },
        severity: Some(Severity::Warning),
        ..Rule::new(Metric::Ph)
    };
    SourceDocument {
        static_recommendations: vec![
            "Test soil every season.".to_string(),
            "Keep records of amendments.".to_string(),
        ],
        ..document("D1", vec![rule])
    }
}

pub(super) fn ph(value: f64) -> ReadingSnapshot {
    ReadingSnapshot::default().with(Metric::Ph, value)
}

pub(super) fn shared_store(readings: ReadingSnapshot) -> SharedInsightsStore {
    Arc::new(Mutex::new(InsightsStore::new(
        DocumentCatalog::research(),
        readings,
    )))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
