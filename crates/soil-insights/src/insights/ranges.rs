//! Document-independent health check for the core soil metrics.
//!
//! Each ranged metric has a normal window plus an outer danger limit on both
//! sides. Salinity (EC) has no generic window and is left to document rules.

use super::domain::Metric;
use super::readings::ReadingSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Ok,
    Warning,
    Danger,
}

impl StatusLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

struct Tier {
    message: &'static str,
    recommendation: &'static str,
}

struct RangeProfile {
    normal: NormalRange,
    danger_below: f64,
    danger_above: f64,
    danger_low: Tier,
    warning_low: Tier,
    danger_high: Tier,
    warning_high: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStatus {
    pub metric: Metric,
    pub level: StatusLevel,
    pub message: &'static str,
    pub recommendation: &'static str,
    pub value: f64,
}

const NORMAL_MESSAGE: &str = "Normal";
const NO_ACTION: &str = "No action needed.";

fn profile(metric: Metric) -> Option<RangeProfile> {
    match metric {
        Metric::Temperature => Some(RangeProfile {
            normal: NormalRange {
                min: 15.0,
                max: 30.0,
                unit: Some("°C"),
            },
            danger_below: 10.0,
            danger_above: 35.0,
            danger_low: Tier {
                message: "Temperature too low",
                recommendation: "Protect plants from frost; consider row covers or moving pots indoors.",
            },
            warning_low: Tier {
                message: "Temperature below optimal",
                recommendation: "Growth may be slow. Consider warming the soil or waiting for warmer weather.",
            },
            danger_high: Tier {
                message: "Temperature too high",
                recommendation: "Provide shade and increase watering to reduce heat stress.",
            },
            warning_high: Tier {
                message: "Temperature above optimal",
                recommendation: "Mulch to keep soil cooler and water in the early morning.",
            },
        }),
        Metric::Moisture => Some(RangeProfile {
            normal: NormalRange {
                min: 40.0,
                max: 70.0,
                unit: Some("%"),
            },
            danger_below: 20.0,
            danger_above: 90.0,
            danger_low: Tier {
                message: "Soil very dry",
                recommendation: "Water soon. Consider drip irrigation for even moisture.",
            },
            warning_low: Tier {
                message: "Moisture below optimal",
                recommendation: "Water when possible. Avoid midday to reduce evaporation.",
            },
            danger_high: Tier {
                message: "Soil waterlogged",
                recommendation: "Improve drainage; reduce watering and check for blocked drains.",
            },
            warning_high: Tier {
                message: "Moisture above optimal",
                recommendation: "Hold off watering; allow soil to dry slightly to avoid root rot.",
            },
        }),
        Metric::Ph => Some(RangeProfile {
            normal: NormalRange {
                min: 6.0,
                max: 7.0,
                unit: None,
            },
            danger_below: 4.5,
            danger_above: 8.5,
            danger_low: Tier {
                message: "pH very acidic",
                recommendation: "Add lime or wood ash in small amounts and retest after a few weeks.",
            },
            warning_low: Tier {
                message: "pH slightly acidic",
                recommendation: "Add garden lime or dolomite to raise pH gradually.",
            },
            danger_high: Tier {
                message: "pH very alkaline",
                recommendation: "Add sulfur or peat moss; use acid-loving plant mixes if in containers.",
            },
            warning_high: Tier {
                message: "pH slightly alkaline",
                recommendation: "Add elemental sulfur or compost to lower pH over time.",
            },
        }),
        Metric::Ec => None,
    }
}

pub fn normal_range(metric: Metric) -> Option<NormalRange> {
    profile(metric).map(|profile| profile.normal)
}

/// Classifies one value. Returns `None` for metrics without a normal range.
pub fn check(metric: Metric, value: f64) -> Option<MetricStatus> {
    let profile = profile(metric)?;

    let (level, tier) = if value < profile.danger_below {
        (StatusLevel::Danger, Some(&profile.danger_low))
    } else if value < profile.normal.min {
        (StatusLevel::Warning, Some(&profile.warning_low))
    } else if value > profile.danger_above {
        (StatusLevel::Danger, Some(&profile.danger_high))
    } else if value > profile.normal.max {
        (StatusLevel::Warning, Some(&profile.warning_high))
    } else {
        (StatusLevel::Ok, None)
    };

    let (message, recommendation) = tier
        .map(|tier| (tier.message, tier.recommendation))
        .unwrap_or((NORMAL_MESSAGE, NO_ACTION));

    Some(MetricStatus {
        metric,
        level,
        message,
        recommendation,
        value,
    })
}

/// Status for every measured metric that has a normal range.
pub fn statuses(readings: &ReadingSnapshot) -> Vec<MetricStatus> {
    readings
        .measured()
        .filter_map(|(metric, value)| check(metric, value))
        .collect()
}

pub fn out_of_range(readings: &ReadingSnapshot) -> Vec<MetricStatus> {
    statuses(readings)
        .into_iter()
        .filter(|status| status.level != StatusLevel::Ok)
        .collect()
}
