use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::domain::ports::SpeechTranscriber;

#[derive(Debug, thiserror::Error)]
#[error("voice tool error: {0}")]
pub struct VoiceToolError(pub String);

#[derive(Debug, Deserialize, Serialize)]
pub struct VoiceArgs {
    pub audio_path: String,
}

/// Transcribes a customer voice message so the agent can treat it like a
/// typed request.
pub struct VoiceTool {
    transcriber: Arc<dyn SpeechTranscriber>,
}

impl VoiceTool {
    pub fn new(transcriber: Arc<dyn SpeechTranscriber>) -> Self {
        Self { transcriber }
    }
}

impl Tool for VoiceTool {
    const NAME: &'static str = "voice_transcript";

    type Error = VoiceToolError;
    type Args = VoiceArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description:
                "Transcribe a customer voice message to text. Use when the customer sent an audio \
                 file instead of typing."
                    .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "audio_path": {
                        "type": "string",
                        "description": "Path to the uploaded audio file"
                    }
                },
                "required": ["audio_path"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.transcriber
            .transcribe(&args.audio_path)
            .await
            .map_err(|e| VoiceToolError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use async_trait::async_trait;

    struct FixedTranscriber;

    #[async_trait]
    impl SpeechTranscriber for FixedTranscriber {
        async fn transcribe(&self, _audio_path: &str) -> Result<String, DomainError> {
            Ok("I want to move my trip to 14:30".into())
        }
    }

    #[tokio::test]
    async fn call_returns_the_transcript() {
        let tool = VoiceTool::new(Arc::new(FixedTranscriber));
        let out = tool
            .call(VoiceArgs {
                audio_path: "/tmp/message.ogg".into(),
            })
            .await
            .unwrap();
        assert_eq!(out, "I want to move my trip to 14:30");
    }
}
