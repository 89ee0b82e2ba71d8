//! Research-backed soil insights.
//!
//! Sensor readings are compared against the threshold and band rules carried by
//! each reference document. The engine is a pure function of its inputs; the
//! store, importer and router around it handle state and I/O.

pub mod catalog;
pub mod domain;
mod engine;
pub mod history;
pub mod ranges;
pub mod readings;
pub mod router;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CatalogIssue, DocumentCatalog};
pub use domain::{Band, DocumentId, Metric, Rule, RuleContext, Severity, SourceDocument, Threshold};
pub use engine::{evaluate, InsightsEngine};
pub use history::{ReadingHistory, ReadingImportError, TimedReading};
pub use ranges::{MetricStatus, StatusLevel};
pub use readings::{NutrientPanel, ReadingSnapshot};
pub use router::insights_router;
pub use store::InsightsStore;
pub use views::{
    Alert, AlertDiscriminator, AlertKey, DocumentInsights, InsightsResult, SeverityCounts,
};
