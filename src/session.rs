use crate::error::AgentError;
use crate::functions::dispatcher::{CallOutcome, Dispatcher};
use crate::functions::{FunctionMetadata, FunctionRegistry};
use crate::providers::{AssistantTurn, LLMProvider, Message, Role};
use std::sync::Arc;

pub const NO_RESPONSE_PLACEHOLDER: &str = "... no response ...";
const EXIT_COMMAND: &str = "exit";

/// Supplies user turns. `Ok(None)` means end of input and is treated like
/// the exit command.
pub trait PromptSource {
    fn read_line(&mut self) -> Result<Option<String>, AgentError>;
}

/// Receives assistant output and dispatch traces.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
    fn trace(&mut self, text: &str);
}

/// One interactive conversation. Owns the transcript for its lifetime; the
/// transcript is append-only and is discarded with the session.
pub struct Session {
    provider: Arc<dyn LLMProvider>,
    dispatcher: Dispatcher,
    functions: Vec<FunctionMetadata>,
    conversation: Vec<Message>,
    temperature: f32,
    last_turn: Option<AssistantTurn>,
}

impl Session {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        registry: Arc<FunctionRegistry>,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            functions: registry.metadata(),
            dispatcher: Dispatcher::new(registry),
            conversation: Vec::new(),
            temperature,
            last_turn: None,
        }
    }

    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }

    /// After a function result the model should report the literal content,
    /// so the follow-up request is deterministic.
    fn next_temperature(&self) -> f32 {
        match self.conversation.last() {
            Some(message) if message.role == Role::Function => 0.0,
            _ => self.temperature,
        }
    }

    fn is_exit(line: &str) -> bool {
        line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
    }

    /// Drive the conversation until the user exits or the transport fails.
    /// Returns the last assistant turn, or `None` if the user exited before
    /// any model call.
    pub async fn run(
        &mut self,
        system_prompt: &str,
        prompts: &mut dyn PromptSource,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<AssistantTurn>, AgentError> {
        self.conversation.push(Message::system(system_prompt));

        let first = match prompts.read_line()? {
            Some(line) if !Self::is_exit(&line) => line,
            _ => return Ok(self.last_turn.take()),
        };
        self.conversation.push(Message::user(first));

        loop {
            let turn = self
                .provider
                .complete(&self.conversation, &self.functions, self.next_temperature())
                .await?;

            let content = turn
                .content
                .clone()
                .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string());
            self.conversation.push(Message {
                role: Role::Assistant,
                content: content.clone(),
                name: None,
                function_call: turn.function_call.clone(),
            });

            let reply_role = turn.role;
            let function_call = turn.function_call.clone();
            self.last_turn = Some(turn);

            if let Some(call) = function_call {
                let outcome = self.dispatcher.dispatch(&call.name, &call.arguments).await?;
                let feedback = match outcome {
                    CallOutcome::Success(message) => Message::function(&call.name, message),
                    CallOutcome::MissingParameters(missing) => Message::function(
                        &call.name,
                        format!(
                            "Missing required parameter(s): {} for function {}",
                            missing.join(", "),
                            call.name
                        ),
                    ),
                    CallOutcome::Error(message) => Message::assistant(format!(
                        "Error executing function {}: {}",
                        call.name, message
                    )),
                };
                sink.trace(&format!("{} => {}", call.name, feedback.content));
                self.conversation.push(feedback);
                continue;
            }

            // Don't show the user's own words back at them
            if reply_role != Role::User {
                sink.emit(&content);
            }

            let next = match prompts.read_line()? {
                Some(line) if !Self::is_exit(&line) => line,
                _ => break,
            };
            self.conversation.push(Message::user(next));
        }

        Ok(self.last_turn.take())
    }
}
