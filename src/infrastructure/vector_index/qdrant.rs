use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    ports::VectorIndex, DocMetadata, DomainError, Embedding, FaqDocument, SearchResult,
};

/// Qdrant-backed index over one collection.
///
/// The collection is created on first connect with cosine distance, which is
/// the ranking metric every search result score reflects. Point ids derive
/// from the document id, so re-upserting the same document replaces its point
/// instead of appending a duplicate.
pub struct QdrantVectorIndex {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl QdrantVectorIndex {
    /// Connects and ensures the collection exists. Fails fast when the
    /// endpoint is unreachable; an optional `QDRANT_API_KEY` is picked up
    /// from the environment.
    pub async fn connect(url: &str, collection: &str, dimension: usize) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .api_key(std::env::var("QDRANT_API_KEY"))
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        let index = Self {
            client,
            collection: collection.to_string(),
            dimension,
        };

        index.ensure_collection().await?;
        Ok(index)
    }

    async fn ensure_collection(&self) -> Result<(), DomainError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let exists = collections
            .collections
            .iter()
            .any(|c| c.name == self.collection);

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| DomainError::external(e.to_string()))?;
            info!(collection = %self.collection, dimension = self.dimension, "created collection");
        }

        Ok(())
    }

    fn uuid_to_point_id(id: Uuid) -> u64 {
        let bytes = id.as_bytes();
        u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }
}

#[async_trait]
impl VectorIndex for QdrantVectorIndex {
    async fn upsert(
        &self,
        document: &FaqDocument,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        let payload: Payload = serde_json::json!({
            "doc_id": document.id.to_string(),
            "content": document.content,
            "source": document.metadata.source,
            "row": document.metadata.row,
        })
        .try_into()
        .map_err(|_| DomainError::internal("failed to build point payload"))?;

        let point = PointStruct::new(
            Self::uuid_to_point_id(document.id),
            embedding.as_slice().to_vec(),
            payload,
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(())
    }

    async fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query.as_slice().to_vec(), k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let search_results: Vec<SearchResult> = results
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;

                let id: Uuid = payload.get("doc_id")?.as_str()?.parse().ok()?;
                let content = payload.get("content")?.as_str()?.to_string();
                let source = payload.get("source")?.as_str()?.to_string();
                let row = payload.get("row")?.as_integer()? as usize;

                Some(SearchResult {
                    document: FaqDocument {
                        id,
                        content,
                        metadata: DocMetadata::new(source, row),
                    },
                    score: point.score,
                })
            })
            .collect();

        Ok(search_results)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
