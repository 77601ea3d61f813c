use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::services::faq_store::FaqStore;
use crate::application::services::synthesizer::AnswerSynthesizer;
use crate::domain::{ports::LlmService, Result, SearchResult, SupportAnswer};
use crate::infrastructure::loader::CsvFaqLoader;

/// The retrieval-augmented support pipeline: loader, FAQ store and answer
/// synthesizer wired together. Constructed once per process; anything that
/// can fail at startup (store connectivity, template validity) fails before
/// the pipeline exists.
pub struct SupportPipeline {
    loader: CsvFaqLoader,
    store: Arc<FaqStore>,
    synthesizer: AnswerSynthesizer,
}

impl SupportPipeline {
    pub fn new(
        loader: CsvFaqLoader,
        store: Arc<FaqStore>,
        llm: Arc<dyn LlmService>,
        answer_template: impl Into<String>,
        top_k: usize,
    ) -> Result<Self> {
        let synthesizer = AnswerSynthesizer::new(store.retriever(top_k), llm, answer_template)?;
        Ok(Self {
            loader,
            store,
            synthesizer,
        })
    }

    /// Explicit ingestion step: load the FAQ source and index every row.
    /// Never runs implicitly per query; errors propagate because a silently
    /// empty index is worse than a failed ingestion. Re-running upserts the
    /// same content-derived ids, so it does not grow the collection.
    #[instrument(skip(self))]
    pub async fn setup_data(&self) -> Result<usize> {
        let documents = self.loader.load().await?;
        let ids = self.store.add_documents(documents).await?;
        info!(count = ids.len(), "FAQ ingestion completed");
        Ok(ids.len())
    }

    /// The externally exposed question-answering capability.
    pub async fn query(&self, question: &str) -> SupportAnswer {
        self.synthesizer.answer(question).await
    }

    /// Diagnostic retrieval without the language model; degrades to empty on
    /// any internal failure, same policy as the store.
    pub async fn search_similar(&self, question: &str, k: usize) -> Vec<SearchResult> {
        self.store.similarity_search(question, k).await
    }
}
