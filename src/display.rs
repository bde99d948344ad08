use crate::session::OutputSink;
use console::style;
use termimad::MadSkin;

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#')
}

/// Terminal sink: markdown-looking replies render through termimad, plain
/// ones print styled, dispatch traces print dimmed.
pub struct ConsoleSink {
    skin: MadSkin,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            skin: MadSkin::default(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for ConsoleSink {
    fn emit(&mut self, text: &str) {
        if looks_like_markdown(text) {
            self.skin.print_text(text);
        } else {
            println!("{} {}", style(">").bold().blue(), text);
        }
    }

    fn trace(&mut self, text: &str) {
        println!("{}", style(format!("(debug) {}", text)).dim());
    }
}
