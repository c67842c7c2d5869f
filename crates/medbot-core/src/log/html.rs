//! In-memory page model of the conversation log.
//!
//! Mirrors the host page's scrolling chat box: entries are kept in insertion
//! order, heights are counted in rows (one per entry), and `render` produces
//! the markup the page's stylesheet expects.

use super::{ConversationLog, LogEntry};

/// Conversation log backed by a `Vec`, with a simple scroll model.
#[derive(Debug, Clone, Default)]
pub struct HtmlLog {
    entries: Vec<LogEntry>,
    viewport_rows: usize,
    scroll_top: usize,
}

impl HtmlLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log whose viewport shows `rows` entries at once.
    pub fn with_viewport(rows: usize) -> Self {
        Self {
            viewport_rows: rows,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total content height in rows.
    pub fn scroll_height(&self) -> usize {
        self.entries.len()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Largest reachable `scroll_top`.
    pub fn max_scroll_top(&self) -> usize {
        self.scroll_height().saturating_sub(self.viewport_rows)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top == self.max_scroll_top()
    }

    /// Render the chat box and every entry as HTML.
    pub fn render(&self) -> String {
        let mut out = String::from(r#"<div id="chat-box" class="chat-box">"#);
        for entry in &self.entries {
            match entry {
                LogEntry::User { html } => {
                    out.push_str(r#"<div class="user-message">"#);
                    out.push_str(html);
                    out.push_str("</div>");
                }
                LogEntry::Bot { avatar, html } => {
                    out.push_str(r#"<div class="bot-message-container">"#);
                    out.push_str(r#"<div class="emoji-avatar">"#);
                    out.push_str(&escape_text(avatar));
                    out.push_str("</div>");
                    out.push_str(r#"<div class="bot-message">"#);
                    out.push_str(html);
                    out.push_str("</div></div>");
                }
            }
        }
        out.push_str("</div>");
        out
    }
}

impl ConversationLog for HtmlLog {
    fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    fn scroll_to_end(&mut self) {
        self.scroll_top = self.max_scroll_top();
    }
}

/// The avatar is set as text content, not markup.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
