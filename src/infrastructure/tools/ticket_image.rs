use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::domain::ports::TicketReader;

#[derive(Debug, thiserror::Error)]
#[error("ticket image tool error: {0}")]
pub struct TicketImageToolError(pub String);

#[derive(Debug, Deserialize, Serialize)]
pub struct TicketImageArgs {
    pub image_path: String,
}

/// Reads the booking id off a photographed ticket so the agent can act on
/// it, typically as the first step of a reschedule.
pub struct TicketImageTool {
    reader: Arc<dyn TicketReader>,
}

impl TicketImageTool {
    pub fn new(reader: Arc<dyn TicketReader>) -> Self {
        Self { reader }
    }
}

impl Tool for TicketImageTool {
    const NAME: &'static str = "ticket_image";

    type Error = TicketImageToolError;
    type Args = TicketImageArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description:
                "Extract the booking id from a photo of a Bookline ticket. Use when the customer \
                 sent an image instead of typing their booking id."
                    .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "image_path": {
                        "type": "string",
                        "description": "Path to the uploaded ticket image"
                    }
                },
                "required": ["image_path"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.reader
            .booking_id_from_image(&args.image_path)
            .await
            .map_err(|e| TicketImageToolError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use async_trait::async_trait;

    struct FixedReader;

    #[async_trait]
    impl TicketReader for FixedReader {
        async fn booking_id_from_image(&self, _image_path: &str) -> Result<String, DomainError> {
            Ok("BKL2026001".into())
        }
    }

    #[tokio::test]
    async fn call_passes_the_extracted_id_through() {
        let tool = TicketImageTool::new(Arc::new(FixedReader));
        let out = tool
            .call(TicketImageArgs {
                image_path: "/tmp/ticket.jpg".into(),
            })
            .await
            .unwrap();
        assert_eq!(out, "BKL2026001");
    }

    #[tokio::test]
    async fn definition_requires_the_image_path() {
        let tool = TicketImageTool::new(Arc::new(FixedReader));
        let def = tool.definition(String::new()).await;
        assert_eq!(def.name, "ticket_image");
        assert_eq!(def.parameters["required"][0], "image_path");
    }
}
