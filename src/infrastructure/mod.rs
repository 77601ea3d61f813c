pub mod agent;
pub mod booking;
pub mod config;
pub mod embedding;
pub mod llm;
pub mod loader;
pub mod media;
pub mod tools;
pub mod vector_index;

pub use agent::SupportAgent;
pub use booking::JsonBookingStore;
pub use config::AppConfig;
pub use embedding::OpenAiEmbedding;
pub use llm::OpenAiLlm;
pub use loader::CsvFaqLoader;
pub use media::{UnavailableTicketReader, UnavailableTranscriber};
pub use tools::{FaqTool, RescheduleTool, TicketImageTool, VoiceTool};
pub use vector_index::{InMemoryVectorIndex, QdrantVectorIndex};
