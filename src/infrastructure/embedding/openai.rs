use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rig::client::{EmbeddingsClient, ProviderClient};
use rig::embeddings::EmbeddingsBuilder;
use rig::providers::openai;
use rig::OneOrMany;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

/// OpenAI embedding provider. Reads `OPENAI_API_KEY` from the environment at
/// call time; every request is bounded by the configured timeout so a hung
/// provider surfaces as a catchable failure.
pub struct OpenAiEmbedding {
    model: String,
    dimension: usize,
    timeout: Duration,
}

impl OpenAiEmbedding {
    pub fn new(model: impl Into<String>, dimension: usize, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            dimension,
            timeout,
        }
    }

    pub fn from_config(config: &EmbeddingConfig, timeout: Duration) -> Self {
        Self::new(&config.model, config.dimension, timeout)
    }

    fn check_dimension(&self, embedding: &Embedding) -> Result<(), DomainError> {
        if embedding.dimension() != self.dimension {
            return Err(DomainError::validation(format!(
                "embedding model {} returned {} dimensions, expected {}",
                self.model,
                embedding.dimension(),
                self.dimension
            )));
        }
        Ok(())
    }
}

fn to_embedding(vec: Vec<f64>) -> Embedding {
    Embedding::new(vec.into_iter().map(|x| x as f32).collect())
}

/// `EmbeddingsBuilder::build` gives no ordering guarantee on the returned
/// pairs, so batch results are re-paired with the request texts by document
/// content. Duplicate texts each consume one returned vector.
fn align_with_inputs(
    texts: &[&str],
    pairs: Vec<(&str, OneOrMany<rig::embeddings::Embedding>)>,
) -> Result<Vec<Embedding>, DomainError> {
    let mut by_text: HashMap<&str, Vec<Embedding>> = HashMap::new();
    for (document, embeddings) in pairs {
        by_text
            .entry(document)
            .or_default()
            .push(to_embedding(embeddings.first().vec));
    }

    texts
        .iter()
        .map(|text| {
            by_text.get_mut(*text).and_then(Vec::pop).ok_or_else(|| {
                DomainError::internal(format!("no embedding returned for text {text:?}"))
            })
        })
        .collect()
}

#[async_trait]
impl EmbeddingService for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let client = openai::Client::from_env();
        let model = client.embedding_model(&self.model);

        let builder = EmbeddingsBuilder::new(model)
            .document(text)
            .map_err(|e| DomainError::external(e.to_string()))?;

        let embeddings = tokio::time::timeout(self.timeout, builder.build())
            .await
            .map_err(|_| DomainError::timeout("embedding request timed out"))?
            .map_err(|e| DomainError::external(e.to_string()))?;

        let embedding = embeddings
            .into_iter()
            .next()
            .map(|(_doc, emb)| to_embedding(emb.first().vec))
            .ok_or_else(|| DomainError::internal("no embedding returned"))?;

        self.check_dimension(&embedding)?;
        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let client = openai::Client::from_env();
        let model = client.embedding_model(&self.model);

        let mut builder = EmbeddingsBuilder::new(model);
        for text in texts {
            builder = builder
                .document(*text)
                .map_err(|e| DomainError::external(e.to_string()))?;
        }

        let pairs = tokio::time::timeout(self.timeout, builder.build())
            .await
            .map_err(|_| DomainError::timeout("embedding request timed out"))?
            .map_err(|e| DomainError::external(e.to_string()))?;

        let embeddings = align_with_inputs(texts, pairs)?;

        for embedding in &embeddings {
            self.check_dimension(embedding)?;
        }
        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
