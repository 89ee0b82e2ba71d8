use super::super::domain::{DocumentId, Metric, SourceDocument};
use std::collections::HashSet;

/// Authoring problem found in a document catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogIssue {
    #[error("document {document} is listed more than once")]
    DuplicateDocument { document: DocumentId },
    #[error("document {document}: band '{band}' on {metric} has neither min nor max")]
    UnboundedBand {
        document: DocumentId,
        metric: Metric,
        band: String,
    },
    #[error("document {document}: band '{band}' on {metric} has min above max")]
    InvertedBand {
        document: DocumentId,
        metric: Metric,
        band: String,
    },
    #[error("document {document}: {metric} threshold has min above max")]
    InvertedThreshold {
        document: DocumentId,
        metric: Metric,
    },
    #[error("document {document}: band '{band}' is defined twice for {metric}")]
    DuplicateBand {
        document: DocumentId,
        metric: Metric,
        band: String,
    },
    #[error("document {document}: more than one {metric} rule defines a min/max threshold")]
    DuplicateThreshold {
        document: DocumentId,
        metric: Metric,
    },
}

fn inverted(min: Option<f64>, max: Option<f64>) -> bool {
    matches!((min, max), (Some(min), Some(max)) if min > max)
}

/// Collects every issue, in catalog order.
pub(crate) fn inspect(documents: &[SourceDocument]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut document_ids = HashSet::new();

    for document in documents {
        if !document_ids.insert(&document.id) {
            issues.push(CatalogIssue::DuplicateDocument {
                document: document.id.clone(),
            });
        }

        let mut band_keys: HashSet<(Metric, &str)> = HashSet::new();
        let mut threshold_metrics: HashSet<Metric> = HashSet::new();

        for rule in &document.rules {
            for band in &rule.bands {
                if band.min.is_none() && band.max.is_none() {
                    issues.push(CatalogIssue::UnboundedBand {
                        document: document.id.clone(),
                        metric: rule.metric,
                        band: band.name.clone(),
                    });
                }
                if inverted(band.min, band.max) {
                    issues.push(CatalogIssue::InvertedBand {
                        document: document.id.clone(),
                        metric: rule.metric,
                        band: band.name.clone(),
                    });
                }
                if !band_keys.insert((rule.metric, band.name.as_str())) {
                    issues.push(CatalogIssue::DuplicateBand {
                        document: document.id.clone(),
                        metric: rule.metric,
                        band: band.name.clone(),
                    });
                }
            }

            if rule.threshold.is_bounded() {
                if inverted(rule.threshold.min, rule.threshold.max) {
                    issues.push(CatalogIssue::InvertedThreshold {
                        document: document.id.clone(),
                        metric: rule.metric,
                    });
                }
                if !threshold_metrics.insert(rule.metric) {
                    issues.push(CatalogIssue::DuplicateThreshold {
                        document: document.id.clone(),
                        metric: rule.metric,
                    });
                }
            }
        }
    }

    issues
}
