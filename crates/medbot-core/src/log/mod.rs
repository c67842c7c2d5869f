//! Conversation log abstraction.
//!
//! The log is the only record of a conversation: an ordered, append-only
//! sequence of rendered entries, oldest first. Implementations decide where
//! entries end up (an in-memory page model, a terminal) and what "scrolled to
//! the bottom" means for them.

pub mod appender;
pub mod html;

use medbot_types::chat::Sender;

pub use appender::{append_message, inline_markup};
pub use html::HtmlLog;

/// One rendered message in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A single user bubble.
    User { html: String },
    /// A bot container: avatar glyph plus bubble.
    Bot { avatar: String, html: String },
}

impl LogEntry {
    pub fn sender(&self) -> Sender {
        match self {
            LogEntry::User { .. } => Sender::User,
            LogEntry::Bot { .. } => Sender::Bot,
        }
    }

    /// Inner HTML of the message bubble.
    pub fn html(&self) -> &str {
        match self {
            LogEntry::User { html } | LogEntry::Bot { html, .. } => html,
        }
    }
}

/// Display surface for a conversation.
///
/// Injected into the appender and controller rather than looked up globally,
/// so tests can hand in an [`HtmlLog`] and inspect it afterwards.
pub trait ConversationLog: Send {
    /// Add an entry after all existing ones.
    fn append(&mut self, entry: LogEntry);

    /// Move the viewport to the newest entry.
    fn scroll_to_end(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accessors() {
        let user = LogEntry::User {
            html: "hi".to_string(),
        };
        let bot = LogEntry::Bot {
            avatar: "*".to_string(),
            html: "<p>hello</p>".to_string(),
        };
        assert_eq!(user.sender(), Sender::User);
        assert_eq!(bot.sender(), Sender::Bot);
        assert_eq!(bot.html(), "<p>hello</p>");
    }
}
