use crate::domain::{errors::DomainError, Embedding};
use async_trait::async_trait;

/// Embedding provider contract: text in, fixed-dimension vector out.
///
/// `dimension()` must match the collection the vectors are written to;
/// changing the embedding model invalidates the whole collection.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;
    /// Returns one vector per input text, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError>;
    fn dimension(&self) -> usize;
}
