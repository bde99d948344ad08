use super::{FunctionMetadata, ParameterSchema, Resolver};
use crate::error::AgentError;
use crate::providers::{LLMProvider, Message};
use async_trait::async_trait;
use serde_json::{Map, Value, json};

const CONVERSION_PROMPT: &str = "You will be provided a set of project requirements. It is your \
job to convert the requirements into a markdown table with following considerations in mind: \
* Categories of work efforts * High level tasks, and their purpose.";

pub fn metadata() -> FunctionMetadata {
    FunctionMetadata {
        name: "convert_requirements_to_md".to_string(),
        description: "Convert a large text of project requirements into a markdown table"
            .to_string(),
        parameters: ParameterSchema::object(
            json!({
                "requirements_text": {
                    "type": "string",
                    "description": "The large context of project requirements"
                }
            }),
            &["requirements_text"],
        ),
    }
}

/// Resolver backed by a nested model call: sends the requirements text
/// through the same provider with a fixed conversion prompt. Runs at
/// temperature 0 so the table tracks the input, not the sampler.
pub struct RequirementsToMarkdown {
    provider: std::sync::Arc<dyn LLMProvider>,
}

impl RequirementsToMarkdown {
    pub fn new(provider: std::sync::Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Resolver for RequirementsToMarkdown {
    async fn resolve(&self, args: &Map<String, Value>) -> Result<String, AgentError> {
        let requirements = args
            .get("requirements_text")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let messages = vec![
            Message::system(CONVERSION_PROMPT),
            Message::user(requirements),
        ];

        let turn = self.provider.complete(&messages, &[], 0.0).await?;
        turn.content
            .ok_or_else(|| AgentError::FunctionExecution("model returned no content".to_string()))
    }
}
