use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::application::SupportPipeline;

#[derive(Debug, thiserror::Error)]
#[error("FAQ tool error: {0}")]
pub struct FaqToolError(pub String);

#[derive(Debug, Deserialize, Serialize)]
pub struct FaqArgs {
    pub question: String,
}

/// Answers service questions through the retrieval-augmented pipeline. The
/// pipeline already degrades internally, so the tool output is always a
/// customer-ready string, apology included.
pub struct FaqTool {
    pipeline: Arc<SupportPipeline>,
}

impl FaqTool {
    pub fn new(pipeline: Arc<SupportPipeline>) -> Self {
        Self { pipeline }
    }
}

impl Tool for FaqTool {
    const NAME: &'static str = "faq_answer";

    type Error = FaqToolError;
    type Args = FaqArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description:
                "Answer a customer question about Bookline services (booking, payment, refunds, \
                 schedules) from the FAQ knowledge base."
                    .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The customer's question, as they asked it"
                    }
                },
                "required": ["question"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let result = self.pipeline.query(&args.question).await;
        Ok(result.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FaqStore;
    use crate::infrastructure::loader::CsvFaqLoader;
    use crate::infrastructure::vector_index::InMemoryVectorIndex;
    use crate::test_support::{LexicalEmbedding, StaticLlm};

    fn pipeline(dir: &tempfile::TempDir) -> Arc<SupportPipeline> {
        let path = dir.path().join("faq.csv");
        std::fs::write(&path, "How to book?,Use the app\n").unwrap();
        let store = Arc::new(
            FaqStore::new(
                Arc::new(LexicalEmbedding::new(64)),
                Arc::new(InMemoryVectorIndex::new(64)),
            )
            .unwrap(),
        );
        Arc::new(
            SupportPipeline::new(
                CsvFaqLoader::new(path),
                store,
                Arc::new(StaticLlm::new("Use the Bookline app.")),
                "{context} {question}",
                3,
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn definition_declares_the_question_argument() {
        let dir = tempfile::tempdir().unwrap();
        let tool = FaqTool::new(pipeline(&dir));

        let def = tool.definition(String::new()).await;
        assert_eq!(def.name, "faq_answer");
        assert_eq!(def.parameters["required"][0], "question");
    }

    #[tokio::test]
    async fn call_returns_the_pipeline_answer() {
        let dir = tempfile::tempdir().unwrap();
        let tool = FaqTool::new(pipeline(&dir));

        let out = tool
            .call(FaqArgs {
                question: "How to book?".into(),
            })
            .await
            .unwrap();
        assert_eq!(out, "Use the Bookline app.");
    }
}
