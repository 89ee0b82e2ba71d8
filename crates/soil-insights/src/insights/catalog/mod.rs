mod research;
mod validation;

pub use validation::CatalogIssue;

use super::domain::{DocumentId, SourceDocument};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read document catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid document catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document catalog failed validation: {}", summarize(.0))]
    Validation(Vec<CatalogIssue>),
}

fn summarize(issues: &[CatalogIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered collection of reference documents. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentCatalog {
    documents: Vec<SourceDocument>,
}

impl DocumentCatalog {
    /// Wraps documents as-is. Use [`DocumentCatalog::validate`] to check them.
    pub fn new(documents: Vec<SourceDocument>) -> Self {
        Self { documents }
    }

    /// Built-in catalog of soil-science articles on wheat, barley and rice.
    pub fn research() -> Self {
        Self::new(research::research_documents())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        debug!(path = %path.display(), documents = catalog.len(), "loaded document catalog");
        Ok(catalog)
    }

    /// Parses a JSON array of documents and rejects catalogs with authoring issues.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let documents: Vec<SourceDocument> = serde_json::from_reader(reader)?;
        let catalog = Self::new(documents);
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let issues = validation::inspect(&self.documents);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation(issues))
        }
    }

    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    pub fn get(&self, id: &DocumentId) -> Option<&SourceDocument> {
        self.documents.iter().find(|document| &document.id == id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
