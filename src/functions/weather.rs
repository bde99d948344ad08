use super::{FunctionMetadata, ParameterSchema, Resolver};
use crate::error::AgentError;
use async_trait::async_trait;
use serde_json::{Map, Value, json};

pub fn metadata() -> FunctionMetadata {
    FunctionMetadata {
        name: "get_current_weather".to_string(),
        description: "Get the current weather in a given location".to_string(),
        parameters: ParameterSchema::object(
            json!({
                "location": {
                    "type": "string",
                    "description": "The city and state, e.g. San Francisco, CA"
                },
                "unit": {"type": "string", "enum": ["celsius", "fahrenheit"]}
            }),
            &["location"],
        ),
    }
}

/// Demo resolver: returns a canned weather report as a JSON string.
pub struct CurrentWeather;

#[async_trait]
impl Resolver for CurrentWeather {
    async fn resolve(&self, args: &Map<String, Value>) -> Result<String, AgentError> {
        let location = args
            .get("location")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let unit = args
            .get("unit")
            .and_then(Value::as_str)
            .unwrap_or("fahrenheit");

        let report = json!({
            "location": location,
            "temperature": "72",
            "unit": unit,
            "forecast": ["sunny", "windy"],
        });

        serde_json::to_string(&report).map_err(AgentError::from)
    }
}
