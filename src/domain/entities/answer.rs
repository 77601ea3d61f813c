use serde::{Deserialize, Serialize};

use crate::domain::entities::document::DocMetadata;

/// A snippet of retrieved evidence attached to an answer. `content` is the
/// document text truncated for display; `metadata` carries its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSource {
    pub content: String,
    pub metadata: DocMetadata,
}

/// The externally visible result of a support query.
///
/// `num_sources` always equals `sources.len()`; use the constructors to keep
/// that invariant. `error` is only present on the degraded path, where
/// `answer` is a fixed apology rather than anything derived from retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportAnswer {
    pub answer: String,
    pub sources: Vec<AnswerSource>,
    pub num_sources: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SupportAnswer {
    pub fn grounded(answer: impl Into<String>, sources: Vec<AnswerSource>) -> Self {
        let num_sources = sources.len();
        Self {
            answer: answer.into(),
            sources,
            num_sources,
            error: None,
        }
    }

    pub fn degraded(apology: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            answer: apology.into(),
            sources: Vec::new(),
            num_sources: 0,
            error: Some(error.into()),
        }
    }
}
