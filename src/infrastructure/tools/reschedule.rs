use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::application::AfterSalesService;

#[derive(Debug, thiserror::Error)]
#[error("reschedule tool error: {0}")]
pub struct RescheduleToolError(pub String);

#[derive(Debug, Deserialize, Serialize)]
pub struct RescheduleArgs {
    pub booking_id: String,
    pub new_time: String,
}

/// Moves an existing booking to a new departure time. An unknown booking id
/// is a normal outcome and comes back as a message for the customer, not as
/// a tool failure.
pub struct RescheduleTool {
    service: Arc<AfterSalesService>,
}

impl RescheduleTool {
    pub fn new(service: Arc<AfterSalesService>) -> Self {
        Self { service }
    }
}

impl Tool for RescheduleTool {
    const NAME: &'static str = "reschedule_booking";

    type Error = RescheduleToolError;
    type Args = RescheduleArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description:
                "Change the departure time of an existing Bookline booking. Requires the booking \
                 id and the new departure time in 24-hour HH:MM format."
                    .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "booking_id": {
                        "type": "string",
                        "description": "The booking reference, e.g. BKL2026001"
                    },
                    "new_time": {
                        "type": "string",
                        "description": "The requested departure time in HH:MM, e.g. 14:30"
                    }
                },
                "required": ["booking_id", "new_time"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let outcome = self
            .service
            .change_departure_time(&args.booking_id, &args.new_time)
            .await
            .map_err(|e| RescheduleToolError(e.to_string()))?;
        Ok(outcome.render())
    }
}
