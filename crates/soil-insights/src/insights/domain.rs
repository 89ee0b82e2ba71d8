use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of sensor measurements that rules can be written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Moisture,
    Ph,
    Ec,
}

impl Metric {
    pub const fn ordered() -> [Self; 4] {
        [Self::Temperature, Self::Moisture, Self::Ph, Self::Ec]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Moisture => "moisture",
            Self::Ph => "ph",
            Self::Ec => "ec",
        }
    }

    /// Label used when a rule does not carry its own `metricLabel`.
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Temperature => "TEMPERATURE",
            Self::Moisture => "MOISTURE",
            Self::Ph => "PH",
            Self::Ec => "EC",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Crop or setting a rule was written for. Carried for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleContext {
    General,
    Wheat,
    Barley,
    Rice,
}

/// Catalog identifier of a reference document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Named sub-range of a rule. Both bounds are inclusive; a missing bound is
/// unbounded on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Band {
    pub fn admits(&self, value: f64) -> bool {
        let min_ok = self.min.map_or(true, |min| value >= min);
        let max_ok = self.max.map_or(true, |max| value <= max);
        min_ok && max_ok
    }
}

/// Which side of a threshold a value fell out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breach {
    Low,
    High,
}

/// Plain min/max sub-rule with its own low/high guidance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommend_low: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommend_high: Option<String>,
}

impl Threshold {
    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Low is checked before high, so an inverted range reports low.
    pub fn breach(&self, value: f64) -> Option<Breach> {
        if self.min.is_some_and(|min| value < min) {
            Some(Breach::Low)
        } else if self.max.is_some_and(|max| value > max) {
            Some(Breach::High)
        } else {
            None
        }
    }

    pub fn recommendation(&self, breach: Breach) -> Option<&str> {
        match breach {
            Breach::Low => self.recommend_low.as_deref(),
            Breach::High => self.recommend_high.as_deref(),
        }
    }
}

/// Metric-scoped classification policy extracted from a document.
///
/// Bands and the threshold are independent sub-rules. Bands are consulted
/// first; the threshold only applies when no band admits the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub metric: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<Band>,
    #[serde(flatten)]
    pub threshold: Threshold,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<RuleContext>,
}

impl Rule {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            metric_label: None,
            bands: Vec::new(),
            threshold: Threshold::default(),
            severity: None,
            context: None,
        }
    }

    pub fn label(&self) -> &str {
        self.metric_label
            .as_deref()
            .unwrap_or_else(|| self.metric.default_label())
    }

    pub fn default_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Warning)
    }

    pub fn matching_band(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|band| band.admits(value))
    }
}

/// Reference document contributing rules and always-shown guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub id: DocumentId,
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub static_recommendations: Vec<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}
