use crate::error::AgentError;
use crate::session::PromptSource;
use console::style;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use std::path::{Path, PathBuf};

fn history_path() -> PathBuf {
    dirs::home_dir()
        .map(|mut path| {
            path.push(".fnchat/input_history.txt");
            path
        })
        .unwrap_or_else(|| Path::new(".fnchat/input_history.txt").to_path_buf())
}

/// Interactive prompt source backed by a rustyline editor with file history.
pub struct LineEditor {
    editor: Editor<(), FileHistory>,
}

impl LineEditor {
    pub fn new() -> Result<Self, AgentError> {
        let mut editor = Editor::new()
            .map_err(|e| AgentError::Input(format!("Failed to create line editor: {}", e)))?;
        let _ = editor.load_history(&history_path());
        Ok(Self { editor })
    }

    pub fn save_history(&mut self) -> Result<(), AgentError> {
        let path = history_path();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AgentError::Input(format!("Failed to create history directory: {}", e))
                })?;
            }
        }

        self.editor
            .save_history(&path)
            .map_err(|e| AgentError::Input(format!("Failed to save history: {}", e)))
    }
}

impl PromptSource for LineEditor {
    fn read_line(&mut self) -> Result<Option<String>, AgentError> {
        let prompt = style("> ").bold().cyan().to_string();
        match self.editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(&line);
                }
                Ok(Some(line))
            }
            // Ctrl-C or Ctrl-D end the session
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(AgentError::Input(format!("Input error: {}", err))),
        }
    }
}
