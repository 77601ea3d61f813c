//! Deterministic test doubles for the provider ports.

use async_trait::async_trait;

use crate::domain::{
    ports::{EmbeddingService, LlmService},
    DomainError, Embedding,
};

/// Offline embedding built from word and character-trigram hashes. Not
/// semantically accurate, but deterministic and content-aware: texts sharing
/// words land closer than unrelated texts, which is enough to exercise
/// ranking end to end.
pub struct LexicalEmbedding {
    dimension: usize,
}

impl LexicalEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let lower = text.to_lowercase();

        for word in lower.split(|c: char| !c.is_alphanumeric()) {
            if word.len() < 3 {
                continue;
            }

            let word_hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            vector[(word_hash as usize) % self.dimension] += 1.0;

            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let trigram_hash = window
                    .iter()
                    .collect::<String>()
                    .bytes()
                    .fold(0u64, |acc, b| acc.wrapping_mul(37).wrapping_add(b as u64));
                vector[(trigram_hash as usize) % self.dimension] += 1.0;
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingService for LexicalEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        Ok(Embedding::new(self.vectorize(text)))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Ok(texts
            .iter()
            .map(|t| Embedding::new(self.vectorize(t)))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Embedding double whose every call fails, for degraded-path tests.
pub struct FailingEmbedding {
    pub dimension: usize,
}

#[async_trait]
impl EmbeddingService for FailingEmbedding {
    async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
        Err(DomainError::external("embedding provider down"))
    }

    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Err(DomainError::external("embedding provider down"))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Completion double returning a fixed reply, recording nothing.
pub struct StaticLlm {
    pub reply: String,
}

impl StaticLlm {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl LlmService for StaticLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, DomainError> {
        Ok(self.reply.clone())
    }
}

/// Completion double whose every call fails.
pub struct FailingLlm;

#[async_trait]
impl LlmService for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::external("completion provider down"))
    }
}
