use std::sync::Arc;

use crate::application::services::faq_store::FaqStore;
use crate::domain::{Result, SearchResult};

/// Retrieval interface with `k` bound once, so the synthesizer never touches
/// the store API directly and the strategy can change behind this seam.
///
/// Failures propagate: the caller owns the degraded-answer boundary. The
/// swallow-to-empty policy belongs to the diagnostic search surface only.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<FaqStore>,
    k: usize,
}

impl Retriever {
    pub fn new(store: Arc<FaqStore>, k: usize) -> Self {
        Self { store, k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.store.try_search(query, self.k).await
    }
}
