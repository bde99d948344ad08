use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Read the system prompt from a requirements file instead of asking
    #[arg(short = 'f', long)]
    pub prompt_file: Option<PathBuf>,

    /// Model to use (overrides OPENAI_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature for ordinary turns (overrides OPENAI_TEMPERATURE)
    #[arg(short, long)]
    pub temperature: Option<f32>,
}
