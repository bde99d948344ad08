use crate::cli::Args;
use crate::error::AgentError;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0613";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Config {
    /// Read configuration from the environment. A missing API key is fatal
    /// before any conversation starts.
    pub fn from_env() -> Result<Self, AgentError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AgentError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = match env::var("OPENAI_TEMPERATURE") {
            Ok(raw) => raw.parse::<f32>().map_err(|_| {
                AgentError::Config(format!("OPENAI_TEMPERATURE is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
        })
    }

    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(model) = &args.model {
            self.model = model.clone();
        }
        if let Some(temperature) = args.temperature {
            self.temperature = temperature;
        }
    }
}
