//! Conversation log printed to a terminal.
//!
//! Bot bubbles arrive as HTML; they are converted to wrapped plain text with
//! `html2text` and printed next to the avatar. User bubbles are echoed in
//! green so the transcript reads like the page.

use std::io::Write;

use console::style;

use medbot_core::log::{ConversationLog, LogEntry};

const INDENT: &str = "     ";
const MIN_WIDTH: usize = 20;

pub struct TerminalLog<W> {
    out: W,
    width: usize,
}

impl<W: Write + Send> TerminalLog<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(MIN_WIDTH),
        }
    }

    /// Size the text to the current terminal.
    pub fn for_terminal(out: W) -> Self {
        let (_, cols) = console::Term::stdout().size();
        Self::new(out, usize::from(cols).saturating_sub(INDENT.len()))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Terminal text for one log entry, ending in a blank line.
pub fn render_entry(entry: &LogEntry, width: usize) -> String {
    match entry {
        LogEntry::User { html } => {
            let text = html2text::from_read(html.as_bytes(), width);
            format!("  {} {}\n\n", style("You:").green().bold(), text.trim_end())
        }
        LogEntry::Bot { avatar, html } => {
            let text = html2text::from_read(html.as_bytes(), width);
            let mut out = String::new();
            for (i, line) in text.trim_end().lines().enumerate() {
                if i == 0 {
                    out.push_str(&format!("  {avatar} {line}\n"));
                } else {
                    out.push_str(&format!("{INDENT}{line}\n"));
                }
            }
            if out.is_empty() {
                out.push_str(&format!("  {avatar}\n"));
            }
            out.push('\n');
            out
        }
    }
}

impl<W: Write + Send> ConversationLog for TerminalLog<W> {
    fn append(&mut self, entry: LogEntry) {
        let text = render_entry(&entry, self.width);
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            tracing::warn!(error = %e, "failed to write chat entry");
        }
    }

    fn scroll_to_end(&mut self) {
        let _ = self.out.flush();
    }
}
