use super::{AssistantTurn, FunctionCall, LLMProvider, Message, Role};
use crate::error::AgentError;
use crate::functions::FunctionMetadata;
use crate::providers::base_client::BaseApiClient;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<&'a [FunctionMetadata]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<&'static str>,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    role: Option<String>,
    content: Option<String>,
    function_call: Option<ResponseFunctionCall>,
}

#[derive(Deserialize)]
struct ResponseFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Clone)]
pub struct OpenAIProvider {
    client: BaseApiClient,
    model: String,
}

impl OpenAIProvider {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: BaseApiClient::new(endpoint, api_key),
            model,
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(
        &self,
        messages: &[Message],
        functions: &[FunctionMetadata],
        temperature: f32,
    ) -> Result<AssistantTurn, AgentError> {
        let req_messages: Vec<ChatCompletionMessage> = messages
            .iter()
            .map(|m| ChatCompletionMessage {
                role: m.role.as_str(),
                content: &m.content,
                name: m.name.as_deref(),
            })
            .collect();

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: req_messages,
            temperature,
            functions: if functions.is_empty() {
                None
            } else {
                Some(functions)
            },
            function_call: if functions.is_empty() {
                None
            } else {
                Some("auto")
            },
        };

        let body = self.client.send_request("chat/completions", &payload).await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Api("No choices in API response".to_string()))?;

        let role = match choice.message.role.as_deref() {
            Some("user") => Role::User,
            Some("system") => Role::System,
            Some("function") => Role::Function,
            _ => Role::Assistant,
        };

        Ok(AssistantTurn {
            role,
            content: choice.message.content,
            function_call: choice.message.function_call.map(|fc| FunctionCall {
                name: fc.name,
                arguments: fc.arguments,
            }),
        })
    }
}
