use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One FAQ knowledge-base entry, ready for indexing.
///
/// The id is derived from the content (UUID v5), so loading the same source
/// twice yields the same ids and ingestion becomes an idempotent upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqDocument {
    pub id: Uuid,
    pub content: String,
    pub metadata: DocMetadata,
}

impl FaqDocument {
    pub fn new(content: impl Into<String>, metadata: DocMetadata) -> Self {
        let content = content.into();
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, content.as_bytes());
        Self {
            id,
            content,
            metadata,
        }
    }
}

/// Provenance of a document: which source file and which row produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    pub source: String,
    pub row: usize,
}

impl DocMetadata {
    pub fn new(source: impl Into<String>, row: usize) -> Self {
        Self {
            source: source.into(),
            row,
        }
    }
}

/// A retrieved document with its similarity score under the index metric
/// (cosine). Higher means more similar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: FaqDocument,
    pub score: f32,
}
