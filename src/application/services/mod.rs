mod after_sales;
mod faq_store;
mod pipeline;
mod retriever;
mod synthesizer;

pub use after_sales::AfterSalesService;
pub use faq_store::FaqStore;
pub use pipeline::SupportPipeline;
pub use retriever::Retriever;
pub use synthesizer::{AnswerSynthesizer, APOLOGY};
