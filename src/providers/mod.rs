use crate::error::AgentError;
use crate::functions::FunctionMetadata;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Function,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Function => "function",
        }
    }
}

/// A pending function-call request carried on an assistant turn.
/// `arguments` is the raw JSON string exactly as the model produced it.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// One entry in the conversation transcript. `name` is set only for
/// role=function messages; `function_call` only for assistant turns that
/// requested a dispatch (kept for inspection, never re-sent on the wire).
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub name: Option<String>,
    pub function_call: Option<FunctionCall>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            name: None,
            function_call: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            name: None,
            function_call: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            name: None,
            function_call: None,
        }
    }

    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            content: content.into(),
            name: Some(name.into()),
            function_call: None,
        }
    }
}

/// One assistant turn as returned by the model: plain content, a
/// function-call request, or both.
#[derive(Debug, Clone)]
pub struct AssistantTurn {
    pub role: Role,
    pub content: Option<String>,
    pub function_call: Option<FunctionCall>,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send the full transcript plus advertised function metadata and return
    /// the next assistant turn. When `functions` is non-empty the provider
    /// requests automatic function selection.
    async fn complete(
        &self,
        messages: &[Message],
        functions: &[FunctionMetadata],
        temperature: f32,
    ) -> Result<AssistantTurn, AgentError>;
}

pub mod base_client;
pub mod openai;
