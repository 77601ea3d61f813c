use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Language-model completion contract. Output text is non-deterministic
/// across calls; callers assert on shape, never on wording.
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}
