mod answer;
mod booking;
mod document;
mod embedding;

pub use answer::{AnswerSource, SupportAnswer};
pub use booking::{Booking, RescheduleOutcome};
pub use document::{DocMetadata, FaqDocument, SearchResult};
pub use embedding::Embedding;
