use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Extracts a booking id from a photographed ticket. The extraction itself is
/// an external capability; this crate only defines the contract the agent
/// invokes.
#[async_trait]
pub trait TicketReader: Send + Sync {
    async fn booking_id_from_image(&self, image_path: &str) -> Result<String, DomainError>;
}

/// Turns a voice-message audio file into a transcript. External capability,
/// same footing as [`TicketReader`].
#[async_trait]
pub trait SpeechTranscriber: Send + Sync {
    async fn transcribe(&self, audio_path: &str) -> Result<String, DomainError>;
}
