use super::domain::{Breach, DocumentId, Metric, Severity};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// What distinguishes alerts raised for the same metric of one document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertDiscriminator {
    Band(String),
    Low,
    High,
}

impl From<Breach> for AlertDiscriminator {
    fn from(breach: Breach) -> Self {
        match breach {
            Breach::Low => Self::Low,
            Breach::High => Self::High,
        }
    }
}

/// Deterministic identity of an alert, used for list keying.
///
/// Renders as `<document>-<metric>-band-<name>`, `<document>-<metric>-low` or
/// `<document>-<metric>-high`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlertKey {
    pub document: DocumentId,
    pub metric: Metric,
    pub discriminator: AlertDiscriminator,
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.discriminator {
            AlertDiscriminator::Band(name) => {
                write!(f, "{}-{}-band-{}", self.document, self.metric, name)
            }
            AlertDiscriminator::Low => write!(f, "{}-{}-low", self.document, self.metric),
            AlertDiscriminator::High => write!(f, "{}-{}-high", self.document, self.metric),
        }
    }
}

impl Serialize for AlertKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "id")]
    pub key: AlertKey,
    pub metric: Metric,
    pub title: String,
    pub severity: Severity,
    pub value: f64,
    pub source_document_id: DocumentId,
    pub source_document_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Alert {
    pub fn id(&self) -> String {
        self.key.to_string()
    }
}

/// Alerts and deduplicated guidance attributed to one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentInsights {
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub info: usize,
    pub warning: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.info + self.warning + self.critical
    }
}

/// Complete output of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightsResult {
    pub alerts: Vec<Alert>,
    pub by_document: BTreeMap<DocumentId, DocumentInsights>,
}

impl InsightsResult {
    pub fn document(&self, id: &DocumentId) -> Option<&DocumentInsights> {
        self.by_document.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
            && self
                .by_document
                .values()
                .all(|bucket| bucket.recommendations.is_empty())
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        self.alerts
            .iter()
            .fold(SeverityCounts::default(), |mut counts, alert| {
                match alert.severity {
                    Severity::Info => counts.info += 1,
                    Severity::Warning => counts.warning += 1,
                    Severity::Critical => counts.critical += 1,
                }
                counts
            })
    }
}
