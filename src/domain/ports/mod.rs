mod booking_repository;
mod embedding;
mod llm;
mod media;
mod vector_index;

pub use booking_repository::BookingRepository;
pub use embedding::EmbeddingService;
pub use llm::LlmService;
pub use media::{SpeechTranscriber, TicketReader};
pub use vector_index::VectorIndex;
