use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{
    ports::VectorIndex, DomainError, Embedding, FaqDocument, SearchResult,
};

/// In-process index with the same contract as the Qdrant adapter: cosine
/// ranking, replace-on-upsert. Used by tests and offline runs.
pub struct InMemoryVectorIndex {
    dimension: usize,
    points: RwLock<Vec<(FaqDocument, Embedding)>>,
}

impl InMemoryVectorIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.points.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(
        &self,
        document: &FaqDocument,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        let mut points = self
            .points
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        points.retain(|(doc, _)| doc.id != document.id);
        points.push((document.clone(), embedding.clone()));
        Ok(())
    }

    async fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let points = self
            .points
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<SearchResult> = points
            .iter()
            .map(|(document, embedding)| SearchResult {
                document: document.clone(),
                score: query.cosine_similarity(embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(k);
        Ok(results)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
