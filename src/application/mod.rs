//! Application layer - use cases and orchestration.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! adapters, so providers and stores can be swapped without touching the
//! pipeline logic.

pub mod services;

pub use services::{
    AfterSalesService, AnswerSynthesizer, FaqStore, Retriever, SupportPipeline, APOLOGY,
};
