//! Placeholder media adapters.
//!
//! Ticket-image OCR and voice transcription are external capabilities that
//! deployments wire in through [`TicketReader`] and [`SpeechTranscriber`].
//! These adapters stand in when nothing is wired: the tools stay registered,
//! and calling one tells the agent the capability is not configured.

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::ports::{SpeechTranscriber, TicketReader};

/// Reader used when no OCR backend is configured.
#[derive(Debug, Default)]
pub struct UnavailableTicketReader;

#[async_trait]
impl TicketReader for UnavailableTicketReader {
    async fn booking_id_from_image(&self, _image_path: &str) -> Result<String, DomainError> {
        Err(DomainError::external(
            "ticket image reading is not configured on this deployment; ask the customer to type \
             their booking id",
        ))
    }
}

/// Transcriber used when no speech backend is configured.
#[derive(Debug, Default)]
pub struct UnavailableTranscriber;

#[async_trait]
impl SpeechTranscriber for UnavailableTranscriber {
    async fn transcribe(&self, _audio_path: &str) -> Result<String, DomainError> {
        Err(DomainError::external(
            "voice transcription is not configured on this deployment; ask the customer to type \
             their request",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_reader_reports_external_error() {
        let err = UnavailableTicketReader
            .booking_id_from_image("/tmp/ticket.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
    }

    #[tokio::test]
    async fn unconfigured_transcriber_reports_external_error() {
        let err = UnavailableTranscriber
            .transcribe("/tmp/message.ogg")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
    }
}
