pub mod dispatcher;
pub mod markdown;
pub mod weather;

use crate::error::AgentError;
use crate::providers::LLMProvider;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// JSON-Schema-like parameter description advertised to the model.
/// Serializes to the exact `{type, properties, required}` wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
}

impl ParameterSchema {
    /// Build an object schema. `properties` should be a JSON object mapping
    /// parameter names to their schemas; anything else yields an empty map.
    pub fn object(properties: Value, required: &[&str]) -> Self {
        let properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            kind: "object",
            properties,
            required: required.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionMetadata {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

/// The executable behavior bound to a function name. Receives arguments that
/// already passed the required-parameter check.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, args: &Map<String, Value>) -> Result<String, AgentError>;
}

pub struct FunctionDefinition {
    pub metadata: FunctionMetadata,
    pub resolver: Arc<dyn Resolver>,
}

/// Static name-to-definition table, populated once at startup and read-only
/// afterwards. Keeps registration order for advertising to the model.
pub struct FunctionRegistry {
    definitions: Vec<FunctionDefinition>,
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        metadata: FunctionMetadata,
        resolver: Arc<dyn Resolver>,
    ) -> Result<(), AgentError> {
        if self.index.contains_key(&metadata.name) {
            return Err(AgentError::DuplicateFunction(metadata.name));
        }

        // Every required name must be a declared property
        for required in &metadata.parameters.required {
            if !metadata.parameters.properties.contains_key(required) {
                return Err(AgentError::Config(format!(
                    "Function {}: required parameter {} is not in properties",
                    metadata.name, required
                )));
            }
        }

        self.index
            .insert(metadata.name.clone(), self.definitions.len());
        self.definitions.push(FunctionDefinition { metadata, resolver });
        Ok(())
    }

    /// All metadata in registration order, as advertised to the model.
    pub fn metadata(&self) -> Vec<FunctionMetadata> {
        self.definitions
            .iter()
            .map(|d| d.metadata.clone())
            .collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in function set advertised on every run.
pub fn builtin_registry(
    provider: Arc<dyn LLMProvider>,
) -> Result<FunctionRegistry, AgentError> {
    let mut registry = FunctionRegistry::new();
    registry.register(
        markdown::metadata(),
        Arc::new(markdown::RequirementsToMarkdown::new(provider)),
    )?;
    registry.register(weather::metadata(), Arc::new(weather::CurrentWeather))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NullResolver;

    #[async_trait]
    impl Resolver for NullResolver {
        async fn resolve(&self, _args: &Map<String, Value>) -> Result<String, AgentError> {
            Ok(String::new())
        }
    }

    fn metadata(name: &str) -> FunctionMetadata {
        FunctionMetadata {
            name: name.to_string(),
            description: format!("test function {}", name),
            parameters: ParameterSchema::object(json!({"x": {"type": "string"}}), &["x"]),
        }
    }

    #[test]
    fn metadata_preserves_registration_order() {
        let mut registry = FunctionRegistry::new();
        registry
            .register(metadata("alpha"), Arc::new(NullResolver))
            .unwrap();
        registry
            .register(metadata("beta"), Arc::new(NullResolver))
            .unwrap();
        registry
            .register(metadata("gamma"), Arc::new(NullResolver))
            .unwrap();

        let names: Vec<String> = registry.metadata().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = FunctionRegistry::new();
        registry
            .register(metadata("alpha"), Arc::new(NullResolver))
            .unwrap();

        let err = registry
            .register(metadata("alpha"), Arc::new(NullResolver))
            .unwrap_err();
        assert!(matches!(err, AgentError::DuplicateFunction(name) if name == "alpha"));
    }

    #[test]
    fn required_name_must_be_a_property() {
        let mut registry = FunctionRegistry::new();
        let bad = FunctionMetadata {
            name: "bad".to_string(),
            description: "required key missing from properties".to_string(),
            parameters: ParameterSchema::object(json!({"x": {"type": "string"}}), &["y"]),
        };

        let err = registry.register(bad, Arc::new(NullResolver)).unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn lookup_finds_registered_functions_only() {
        let mut registry = FunctionRegistry::new();
        registry
            .register(metadata("alpha"), Arc::new(NullResolver))
            .unwrap();

        assert!(registry.lookup("alpha").is_some());
        assert!(registry.lookup("Alpha").is_none());
        assert!(registry.lookup("beta").is_none());
    }
}
