use clap::Parser;
use console::style;
use is_terminal::IsTerminal;
use std::fs;
use std::sync::Arc;

mod cli;
mod config;
mod display;
mod error;
mod functions;
mod input;
mod providers;
mod session;

use crate::cli::Args;
use crate::config::Config;
use crate::display::ConsoleSink;
use crate::error::AgentError;
use crate::input::LineEditor;
use crate::providers::{LLMProvider, openai::OpenAIProvider};
use crate::session::{PromptSource, Session};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {}", style("error:").bold().red(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AgentError> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    config.apply_overrides(&args);

    if !std::io::stdin().is_terminal() {
        return Err(AgentError::Input(
            "stdin must be a terminal; pass a requirements file with --prompt-file".to_string(),
        ));
    }

    let provider: Arc<dyn LLMProvider> = Arc::new(OpenAIProvider::new(
        config.base_url.clone(),
        config.api_key.clone(),
        config.model.clone(),
    ));
    let registry = Arc::new(functions::builtin_registry(provider.clone())?);
    let mut session = Session::new(provider, registry, config.temperature);

    let mut prompts = LineEditor::new()?;

    let system_prompt = match &args.prompt_file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            AgentError::Input(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            println!("Enter a system prompt:");
            prompts
                .read_line()?
                .filter(|line| !line.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
        }
    };

    println!("Ask your first question. Type 'exit' to quit.");

    let mut sink = ConsoleSink::new();
    session.run(&system_prompt, &mut prompts, &mut sink).await?;

    prompts.save_history()?;
    Ok(())
}
