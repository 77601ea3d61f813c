use crate::domain::{errors::DomainError, Embedding, FaqDocument, SearchResult};
use async_trait::async_trait;

/// Raw vector index over one named collection.
///
/// Ranking metric is cosine similarity; `search` returns results in
/// non-increasing score order, at most `k` of them. Upserting an id that is
/// already present replaces the stored point.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, document: &FaqDocument, embedding: &Embedding)
        -> Result<(), DomainError>;
    async fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>, DomainError>;
    /// Dimensionality the collection was created with.
    fn dimension(&self) -> usize;
}
