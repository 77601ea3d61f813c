use std::sync::Arc;

use tracing::{error, instrument};

use crate::application::services::retriever::Retriever;
use crate::domain::{
    ports::LlmService, AnswerSource, DomainError, Result, SearchResult, SupportAnswer,
};

/// Fixed answer for any failure on the synthesis path. End users never see
/// the underlying provider error; that goes to the `error` field and the log.
pub const APOLOGY: &str =
    "Sorry, something went wrong while answering your question. Please try again in a moment.";

/// Display truncation for source snippets, counted in characters because the
/// knowledge base is multilingual.
const SNIPPET_CHARS: usize = 200;

/// Grounded answer generation: retrieve, build context, render the prompt,
/// complete, attach sources.
pub struct AnswerSynthesizer {
    retriever: Retriever,
    llm: Arc<dyn LlmService>,
    template: String,
}

impl AnswerSynthesizer {
    /// The template must carry both `{context}` and `{question}`; a template
    /// that cannot be rendered is a configuration error caught here, not at
    /// the first question.
    pub fn new(
        retriever: Retriever,
        llm: Arc<dyn LlmService>,
        template: impl Into<String>,
    ) -> Result<Self> {
        let template = template.into();
        for placeholder in ["{context}", "{question}"] {
            if !template.contains(placeholder) {
                return Err(DomainError::validation(format!(
                    "answer template is missing the {placeholder} placeholder"
                )));
            }
        }
        Ok(Self {
            retriever,
            llm,
            template,
        })
    }

    /// Never fails: any retrieval or completion error inside collapses into
    /// the fixed degraded answer. Zero retrieved documents is not an error;
    /// the model is prompted with an empty context and is expected to say it
    /// lacks the information.
    #[instrument(skip(self))]
    pub async fn answer(&self, question: &str) -> SupportAnswer {
        match self.try_answer(question).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "answer synthesis degraded");
                SupportAnswer::degraded(APOLOGY, e.to_string())
            }
        }
    }

    async fn try_answer(&self, question: &str) -> Result<SupportAnswer> {
        let retrieved = self.retriever.retrieve(question).await?;

        let context = build_context(&retrieved);
        let prompt = render_prompt(&self.template, &context, question);
        let raw = self.llm.complete(&prompt).await?;

        let sources = retrieved
            .iter()
            .map(|r| AnswerSource {
                content: truncate_snippet(&r.document.content, SNIPPET_CHARS),
                metadata: r.document.metadata.clone(),
            })
            .collect();

        Ok(SupportAnswer::grounded(raw.trim(), sources))
    }
}

/// Retrieved contents joined in ranking order; no re-ranking here.
fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.document.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Pure substitution: same inputs, same rendered prompt.
fn render_prompt(template: &str, context: &str, question: &str) -> String {
    template
        .replace("{context}", context)
        .replace("{question}", question)
}

fn truncate_snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut snippet: String = text.chars().take(max_chars).collect();
    snippet.push_str("...");
    snippet
}
