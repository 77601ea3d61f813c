use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::openai;
use std::sync::Arc;
use std::time::Duration;

use crate::application::{AfterSalesService, SupportPipeline};
use crate::domain::ports::{SpeechTranscriber, TicketReader};
use crate::domain::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::media::{UnavailableTicketReader, UnavailableTranscriber};
use crate::infrastructure::tools::{FaqTool, RescheduleTool, TicketImageTool, VoiceTool};

/// The customer-facing support agent. The model decides per message whether
/// to reply directly or route through one of the registered tools; tool
/// observations feed back into the same exchange until the model produces a
/// final reply or the turn budget runs out.
pub struct SupportAgent {
    client: openai::Client,
    model: String,
    preamble: String,
    max_tool_turns: usize,
    timeout: Duration,
    pipeline: Arc<SupportPipeline>,
    after_sales: Arc<AfterSalesService>,
    ticket_reader: Arc<dyn TicketReader>,
    transcriber: Arc<dyn SpeechTranscriber>,
}

impl SupportAgent {
    pub fn new(
        pipeline: Arc<SupportPipeline>,
        after_sales: Arc<AfterSalesService>,
        config: &AppConfig,
    ) -> Self {
        Self {
            client: openai::Client::from_env(),
            model: config.llm.model.clone(),
            preamble: config.prompts.agent_preamble.clone(),
            max_tool_turns: config.agent.max_tool_turns,
            timeout: Duration::from_secs(config.llm.timeout_seconds),
            pipeline,
            after_sales,
            ticket_reader: Arc::new(UnavailableTicketReader),
            transcriber: Arc::new(UnavailableTranscriber),
        }
    }

    pub fn with_ticket_reader(mut self, reader: Arc<dyn TicketReader>) -> Self {
        self.ticket_reader = reader;
        self
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn SpeechTranscriber>) -> Self {
        self.transcriber = transcriber;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Handle one customer message and return the agent's reply. Tool calls
    /// happen inside this exchange; nothing is remembered between calls.
    pub async fn respond(&self, message: &str) -> Result<String, DomainError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(&self.preamble)
            .tool(FaqTool::new(self.pipeline.clone()))
            .tool(RescheduleTool::new(self.after_sales.clone()))
            .tool(TicketImageTool::new(self.ticket_reader.clone()))
            .tool(VoiceTool::new(self.transcriber.clone()))
            .build();

        tokio::time::timeout(
            self.timeout,
            agent.prompt(message).multi_turn(self.max_tool_turns),
        )
        .await
        .map_err(|_| DomainError::timeout("agent reply timed out"))?
        .map_err(|e| DomainError::external(format!("agent failed: {e}")))
    }
}
