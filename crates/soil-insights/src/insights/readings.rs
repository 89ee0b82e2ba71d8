use super::domain::Metric;
use serde::{Deserialize, Serialize};

/// Latest value per ruled metric.
///
/// Only the closed [`Metric`] set can be evaluated. Values the sensors report
/// that no rule refers to live in [`NutrientPanel`] so they cannot be mistaken
/// for ruled input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadingSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec: Option<f64>,
    #[serde(default, skip_serializing_if = "NutrientPanel::is_empty")]
    pub nutrients: NutrientPanel,
}

/// Informational N/P/K values shown next to the readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NutrientPanel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nitrogen: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
}

impl NutrientPanel {
    pub fn is_empty(&self) -> bool {
        self.nitrogen.is_none() && self.phosphorus.is_none() && self.potassium.is_none()
    }
}

impl ReadingSnapshot {
    /// Readings the service starts with before any sensor update arrives.
    pub fn demo() -> Self {
        Self {
            temperature: Some(24.0),
            moisture: Some(53.0),
            ph: Some(6.4),
            ec: Some(0.6),
            nutrients: NutrientPanel {
                nitrogen: Some(115.0),
                phosphorus: Some(45.0),
                potassium: Some(210.0),
            },
        }
    }

    /// Current value for `metric`. Non-finite values count as not measured.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        let value = match metric {
            Metric::Temperature => self.temperature,
            Metric::Moisture => self.moisture,
            Metric::Ph => self.ph,
            Metric::Ec => self.ec,
        };
        value.filter(|value| value.is_finite())
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::Temperature => &mut self.temperature,
            Metric::Moisture => &mut self.moisture,
            Metric::Ph => &mut self.ph,
            Metric::Ec => &mut self.ec,
        };
        *slot = value;
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    /// Present metrics in [`Metric::ordered`] order.
    pub fn measured(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ordered()
            .into_iter()
            .filter_map(|metric| self.get(metric).map(|value| (metric, value)))
    }

    /// Fills every metric this snapshot lacks from `fallback`.
    pub fn or(mut self, fallback: &ReadingSnapshot) -> Self {
        for metric in Metric::ordered() {
            if self.get(metric).is_none() {
                self.set(metric, fallback.get(metric));
            }
        }
        let nutrients = &mut self.nutrients;
        nutrients.nitrogen = nutrients.nitrogen.or(fallback.nutrients.nitrogen);
        nutrients.phosphorus = nutrients.phosphorus.or(fallback.nutrients.phosphorus);
        nutrients.potassium = nutrients.potassium.or(fallback.nutrients.potassium);
        self
    }
}
