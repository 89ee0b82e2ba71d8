mod assembly;
mod rules;

use super::catalog::DocumentCatalog;
use super::domain::SourceDocument;
use super::readings::ReadingSnapshot;
use super::views::InsightsResult;

/// Compares `readings` against every rule of every document, in catalog order.
///
/// Pure and total: the same inputs always produce the same alerts in the same
/// order, and missing readings simply contribute nothing.
pub fn evaluate(readings: &ReadingSnapshot, documents: &[SourceDocument]) -> InsightsResult {
    let mut result = InsightsResult::default();

    for document in documents {
        let bucket = result.by_document.entry(document.id.clone()).or_default();
        assembly::collect_document(document, readings, bucket, &mut result.alerts);
    }

    result
}

/// Stateless evaluator bound to a document catalog.
#[derive(Debug, Clone)]
pub struct InsightsEngine {
    catalog: DocumentCatalog,
}

impl InsightsEngine {
    pub fn new(catalog: DocumentCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    pub fn evaluate(&self, readings: &ReadingSnapshot) -> InsightsResult {
        evaluate(readings, self.catalog.documents())
    }
}
