use std::io;
use thiserror::Error;

/// Unified error type for the fnchat application
#[derive(Error, Debug)]
pub enum AgentError {
    /// API-related errors (bad status, malformed completion, empty choices)
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// The model requested a function the registry never advertised
    #[error("Function {0} not found")]
    UnknownFunction(String),

    /// Two functions registered under the same name
    #[error("Function {0} registered twice")]
    DuplicateFunction(String),

    /// A resolver failed during execution
    #[error("{0}")]
    FunctionExecution(String),
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgentError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            AgentError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            AgentError::Api(format!("API returned error status: {}", err))
        } else {
            AgentError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(format!("JSON error: {}", err))
    }
}
