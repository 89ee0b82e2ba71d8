use super::catalog::DocumentCatalog;
use super::engine::InsightsEngine;
use super::readings::ReadingSnapshot;
use super::views::InsightsResult;
use tracing::debug;

/// Owns the current reading snapshot and memoizes its evaluation.
///
/// The cached result is keyed on the snapshot value: replacing the readings
/// with an equal snapshot keeps it, anything else discards it and the next
/// [`InsightsStore::insights`] call re-evaluates.
#[derive(Debug, Clone)]
pub struct InsightsStore {
    engine: InsightsEngine,
    readings: ReadingSnapshot,
    cached: Option<InsightsResult>,
    evaluations: u64,
}

impl InsightsStore {
    pub fn new(catalog: DocumentCatalog, readings: ReadingSnapshot) -> Self {
        Self {
            engine: InsightsEngine::new(catalog),
            readings,
            cached: None,
            evaluations: 0,
        }
    }

    pub fn readings(&self) -> &ReadingSnapshot {
        &self.readings
    }

    pub fn catalog(&self) -> &DocumentCatalog {
        self.engine.catalog()
    }

    pub fn engine(&self) -> &InsightsEngine {
        &self.engine
    }

    /// Number of times the engine has actually run.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn replace_readings(&mut self, readings: ReadingSnapshot) {
        if readings == self.readings {
            return;
        }
        self.readings = readings;
        self.cached = None;
    }

    pub fn update_readings<F>(&mut self, update: F)
    where
        F: FnOnce(&mut ReadingSnapshot),
    {
        let mut next = self.readings.clone();
        update(&mut next);
        self.replace_readings(next);
    }

    pub fn insights(&mut self) -> &InsightsResult {
        self.cached.get_or_insert_with(|| {
            let result = self.engine.evaluate(&self.readings);
            self.evaluations += 1;
            debug!(
                evaluations = self.evaluations,
                alerts = result.alerts.len(),
                "re-evaluated soil insights"
            );
            result
        })
    }
}
