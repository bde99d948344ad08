use super::FunctionRegistry;
use crate::error::AgentError;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Outcome of one function dispatch, consumed by the session loop to decide
/// which role to append to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success(String),
    MissingParameters(Vec<String>),
    Error(String),
}

pub struct Dispatcher {
    registry: Arc<FunctionRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self { registry }
    }

    /// Validate and execute one requested call.
    ///
    /// An unknown name is a protocol violation (the model was only told about
    /// registered functions) and fails the run. Everything else is converted
    /// to a `CallOutcome` so the conversation can keep going.
    pub async fn dispatch(
        &self,
        name: &str,
        raw_arguments: &str,
    ) -> Result<CallOutcome, AgentError> {
        let definition = self
            .registry
            .lookup(name)
            .ok_or_else(|| AgentError::UnknownFunction(name.to_string()))?;

        // Lenient parse: a zero-argument call may arrive as "", whitespace,
        // or otherwise malformed JSON.
        let args: Map<String, Value> = match serde_json::from_str::<Value>(raw_arguments) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        // Only absence counts as missing; an explicit null is present.
        let missing: Vec<String> = definition
            .metadata
            .parameters
            .required
            .iter()
            .filter(|param| !args.contains_key(param.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Ok(CallOutcome::MissingParameters(missing));
        }

        match definition.resolver.resolve(&args).await {
            Ok(message) => Ok(CallOutcome::Success(message)),
            Err(err) => Ok(CallOutcome::Error(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{FunctionMetadata, ParameterSchema, Resolver};
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoLocation;

    #[async_trait]
    impl Resolver for EchoLocation {
        async fn resolve(&self, args: &Map<String, Value>) -> Result<String, AgentError> {
            let location = args
                .get("location")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Ok(format!("weather for {}", location))
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl Resolver for AlwaysFails {
        async fn resolve(&self, _args: &Map<String, Value>) -> Result<String, AgentError> {
            Err(AgentError::FunctionExecution("upstream unavailable".to_string()))
        }
    }

    struct NoArgs;

    #[async_trait]
    impl Resolver for NoArgs {
        async fn resolve(&self, _args: &Map<String, Value>) -> Result<String, AgentError> {
            Ok("ok".to_string())
        }
    }

    fn dispatcher() -> Dispatcher {
        let mut registry = FunctionRegistry::new();
        registry
            .register(
                FunctionMetadata {
                    name: "get_current_weather".to_string(),
                    description: "Get the current weather in a given location".to_string(),
                    parameters: ParameterSchema::object(
                        json!({
                            "location": {"type": "string"},
                            "unit": {"type": "string", "enum": ["celsius", "fahrenheit"]},
                        }),
                        &["location"],
                    ),
                },
                Arc::new(EchoLocation),
            )
            .unwrap();
        registry
            .register(
                FunctionMetadata {
                    name: "two_required".to_string(),
                    description: "needs both parameters".to_string(),
                    parameters: ParameterSchema::object(
                        json!({
                            "first": {"type": "string"},
                            "second": {"type": "string"},
                        }),
                        &["first", "second"],
                    ),
                },
                Arc::new(NoArgs),
            )
            .unwrap();
        registry
            .register(
                FunctionMetadata {
                    name: "always_fails".to_string(),
                    description: "resolver that errors".to_string(),
                    parameters: ParameterSchema::object(json!({}), &[]),
                },
                Arc::new(AlwaysFails),
            )
            .unwrap();
        registry
            .register(
                FunctionMetadata {
                    name: "no_args".to_string(),
                    description: "zero-argument function".to_string(),
                    parameters: ParameterSchema::object(json!({}), &[]),
                },
                Arc::new(NoArgs),
            )
            .unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn unknown_name_is_a_protocol_violation() {
        let err = dispatcher().dispatch("not_registered", "{}").await.unwrap_err();
        assert!(matches!(err, AgentError::UnknownFunction(name) if name == "not_registered"));
    }

    #[tokio::test]
    async fn missing_required_parameters_in_declared_order() {
        let outcome = dispatcher().dispatch("two_required", "{}").await.unwrap();
        assert_eq!(
            outcome,
            CallOutcome::MissingParameters(vec!["first".to_string(), "second".to_string()])
        );
    }

    #[tokio::test]
    async fn only_absent_parameters_are_missing() {
        let outcome = dispatcher()
            .dispatch("two_required", r#"{"first": null}"#)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            CallOutcome::MissingParameters(vec!["second".to_string()])
        );
    }

    #[tokio::test]
    async fn malformed_arguments_parse_as_empty_object() {
        let outcome = dispatcher().dispatch("no_args", "   ").await.unwrap();
        assert_eq!(outcome, CallOutcome::Success("ok".to_string()));

        let outcome = dispatcher().dispatch("no_args", "not json").await.unwrap();
        assert_eq!(outcome, CallOutcome::Success("ok".to_string()));
    }

    #[tokio::test]
    async fn success_passes_resolver_output_through() {
        let outcome = dispatcher()
            .dispatch("get_current_weather", r#"{"location":"NYC"}"#)
            .await
            .unwrap();
        assert_eq!(outcome, CallOutcome::Success("weather for NYC".to_string()));
    }

    #[tokio::test]
    async fn resolver_failure_is_captured_as_data() {
        let outcome = dispatcher().dispatch("always_fails", "{}").await.unwrap();
        match outcome {
            CallOutcome::Error(message) => assert!(message.contains("upstream unavailable")),
            other => panic!("expected error outcome, got {:?}", other),
        }
    }
}
