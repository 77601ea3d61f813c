use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{DomainError, Result};

const DEFAULT_ANSWER_TEMPLATE: &str = "\
You are the AI assistant for Bookline, an online ticket-booking platform.

Your job:
- Answer questions about Bookline services accurately and in a friendly tone
- Ground your answer in the knowledge-base excerpts below
- If the excerpts do not cover the question, say you lack that information and \
suggest contacting the support team

Knowledge-base excerpts:
{context}

Customer question: {question}

Answer in a friendly, professional tone:";

const DEFAULT_AGENT_PREAMBLE: &str = "\
You are the Bookline customer-support assistant. Use faq_answer for questions \
about Bookline services, reschedule_booking to change a departure time, \
ticket_image to read a booking id off a ticket photo and voice_transcript to \
transcribe a voice message. Answer in the language the customer wrote in.";

/// Process configuration. Loaded from an optional YAML file named by
/// `BOOKLINE_CONFIG`, then overlaid with endpoint/path environment variables.
/// Credentials never live here: `OPENAI_API_KEY` is read by the provider
/// client and `QDRANT_API_KEY` by the index adapter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub qdrant: QdrantConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
    pub agent: AgentConfig,
    pub data: DataConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QdrantConfig {
    pub url: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_tool_turns: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub faq_path: PathBuf,
    pub bookings_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub answer_template: String,
    pub agent_preamble: String,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".into(),
            collection: "bookline_faq".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".into(),
            dimension: 1536,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            timeout_seconds: 30,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_tool_turns: 5 }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            faq_path: PathBuf::from("data/faq_data.csv"),
            bookings_path: PathBuf::from("data/bookings.json"),
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            answer_template: DEFAULT_ANSWER_TEMPLATE.into(),
            agent_preamble: DEFAULT_AGENT_PREAMBLE.into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            qdrant: QdrantConfig::default(),
            embedding: EmbeddingConfig::default(),
            llm: LlmConfig::default(),
            retrieval: RetrievalConfig::default(),
            agent: AgentConfig::default(),
            data: DataConfig::default(),
            prompts: PromptsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the config file named by `BOOKLINE_CONFIG` (defaults when unset),
    /// overlay environment variables, and validate. Errors here are fatal to
    /// the process, not recoverable per request.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("BOOKLINE_CONFIG") {
            Ok(path) => {
                let text = std::fs::read_to_string(&path).map_err(|e| {
                    DomainError::not_found(format!("config file {path}: {e}"))
                })?;
                Self::from_yaml(&text)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(url) = std::env::var("QDRANT_URL") {
            config.qdrant.url = url;
        }
        if let Ok(path) = std::env::var("FAQ_DATA_PATH") {
            config.data.faq_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("BOOKINGS_PATH") {
            config.data.bookings_path = PathBuf::from(path);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| DomainError::validation(format!("config parse error: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        for placeholder in ["{context}", "{question}"] {
            if !self.prompts.answer_template.contains(placeholder) {
                return Err(DomainError::validation(format!(
                    "answer template is missing the {placeholder} placeholder"
                )));
            }
        }
        if self.embedding.dimension == 0 {
            return Err(DomainError::validation("embedding dimension must be positive"));
        }
        if self.retrieval.top_k == 0 {
            return Err(DomainError::validation("retrieval top_k must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.qdrant.collection, "bookline_faq");
        assert_eq!(config.embedding.dimension, 1536);
        assert_eq!(config.retrieval.top_k, 3);
    }

    #[test]
    fn partial_yaml_keeps_defaults_elsewhere() {
        let config = AppConfig::from_yaml("llm:\n  model: gpt-4o\n").unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.timeout_seconds, 30);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
    }

    #[test]
    fn template_without_placeholders_is_rejected() {
        let mut config = AppConfig::default();
        config.prompts.answer_template = "no placeholders here".into();
        assert!(matches!(
            config.validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let mut config = AppConfig::default();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());
    }
}
