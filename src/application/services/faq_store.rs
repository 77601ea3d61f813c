use std::sync::Arc;

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::application::services::retriever::Retriever;
use crate::domain::{
    ports::{EmbeddingService, VectorIndex},
    DomainError, FaqDocument, Result, SearchResult,
};

/// Semantic index over the FAQ knowledge base: embedding provider plus the
/// underlying vector index, bound to one collection.
///
/// Ingestion failures propagate (a silent half-empty index would poison every
/// later answer). Search comes in two flavors: [`Self::similarity_search`]
/// degrades failures to an empty result set for the diagnostic surface, while
/// [`Self::try_search`] propagates them so the answering path can fall back to
/// its degraded answer instead of replying confidently with no evidence.
pub struct FaqStore {
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
}

impl FaqStore {
    /// Fails fast when the embedding model and the collection disagree on
    /// dimensionality; that is a configuration error, not a per-request one.
    pub fn new(embedding: Arc<dyn EmbeddingService>, index: Arc<dyn VectorIndex>) -> Result<Self> {
        if embedding.dimension() != index.dimension() {
            return Err(DomainError::validation(format!(
                "embedding dimension {} does not match collection dimension {}",
                embedding.dimension(),
                index.dimension()
            )));
        }
        Ok(Self { embedding, index })
    }

    /// Embeds and upserts the documents, returning their ids in input order.
    /// Document ids are content-derived, so re-ingesting the same source
    /// replaces points instead of duplicating them.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn add_documents(&self, documents: Vec<FaqDocument>) -> Result<Vec<Uuid>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        let mut ids = Vec::with_capacity(documents.len());
        for (document, embedding) in documents.iter().zip(embeddings.iter()) {
            self.index.upsert(document, embedding).await?;
            ids.push(document.id);
        }

        Ok(ids)
    }

    /// Top-k documents by descending cosine similarity. Provider or store
    /// failures are logged and produce an empty set: callers must read empty
    /// as "no evidence found", never as an error.
    #[instrument(skip(self))]
    pub async fn similarity_search(&self, query: &str, k: usize) -> Vec<SearchResult> {
        match self.try_search(query, k).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "similarity search degraded to empty results");
                Vec::new()
            }
        }
    }

    /// Fallible variant of [`Self::similarity_search`]: provider and store
    /// errors reach the caller. The answer synthesizer retrieves through this
    /// so a dead store surfaces as a degraded answer, not an empty context.
    pub async fn try_search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let embedding = self.embedding.embed(query).await?;
        self.index.search(&embedding, k).await
    }

    /// A retriever with `k` fixed for repeated calls. Store reachability was
    /// already proven when the index connected.
    pub fn retriever(self: &Arc<Self>, k: usize) -> Retriever {
        Retriever::new(self.clone(), k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocMetadata;
    use crate::infrastructure::vector_index::InMemoryVectorIndex;
    use crate::test_support::{FailingEmbedding, LexicalEmbedding};

    fn store_with_index() -> (Arc<FaqStore>, Arc<InMemoryVectorIndex>) {
        let index = Arc::new(InMemoryVectorIndex::new(64));
        let store = FaqStore::new(
            Arc::new(LexicalEmbedding::new(64)),
            index.clone() as Arc<dyn VectorIndex>,
        )
        .unwrap();
        (Arc::new(store), index)
    }

    fn faq_docs() -> Vec<FaqDocument> {
        vec![
            FaqDocument::new(
                "question: How to book?\nanswer: Use the app",
                DocMetadata::new("faq.csv", 0),
            ),
            FaqDocument::new(
                "question: Refund policy?\nanswer: Contact support",
                DocMetadata::new("faq.csv", 1),
            ),
        ]
    }

    #[test]
    fn mismatched_dimensions_fail_construction() {
        let err = FaqStore::new(
            Arc::new(LexicalEmbedding::new(32)),
            Arc::new(InMemoryVectorIndex::new(64)),
        )
        .err()
        .unwrap();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn add_documents_returns_ids_in_input_order() {
        let (store, _) = store_with_index();
        let docs = faq_docs();
        let expected: Vec<_> = docs.iter().map(|d| d.id).collect();

        let ids = store.add_documents(docs).await.unwrap();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn reingesting_the_same_source_does_not_duplicate() {
        let (store, index) = store_with_index();

        store.add_documents(faq_docs()).await.unwrap();
        store.add_documents(faq_docs()).await.unwrap();

        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn search_is_bounded_and_ordered() {
        let (store, _) = store_with_index();
        store.add_documents(faq_docs()).await.unwrap();

        let results = store.similarity_search("refund", 1).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].document.content.contains("Refund"));

        let all = store.similarity_search("refund", 10).await;
        assert!(all.len() <= 10);
        for pair in all.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn provider_failure_degrades_search_to_empty() {
        let store = FaqStore::new(
            Arc::new(FailingEmbedding { dimension: 64 }),
            Arc::new(InMemoryVectorIndex::new(64)),
        )
        .unwrap();

        let results = store.similarity_search("anything", 3).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn fallible_search_propagates_provider_failure() {
        let store = FaqStore::new(
            Arc::new(FailingEmbedding { dimension: 64 }),
            Arc::new(InMemoryVectorIndex::new(64)),
        )
        .unwrap();

        let err = store.try_search("anything", 3).await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
    }

    #[tokio::test]
    async fn ingestion_failure_propagates() {
        let store = FaqStore::new(
            Arc::new(FailingEmbedding { dimension: 64 }),
            Arc::new(InMemoryVectorIndex::new(64)),
        )
        .unwrap();

        let err = store.add_documents(faq_docs()).await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
    }
}
