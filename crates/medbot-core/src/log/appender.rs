//! Message appender.
//!
//! Turns a message into a [`LogEntry`], appends it, and scrolls the log to
//! the bottom.

use medbot_types::chat::Sender;

use super::{ConversationLog, LogEntry};
use crate::format::emphasize_bold;

/// Bold spans to `<strong>`, newlines to `<br>`.
///
/// Applied to every appended message, including bot text that already went
/// through [`crate::format::format_reply`]. Running it twice is not a no-op
/// in general: a literal `**` that survived the first pass can pair up on
/// the second.
pub fn inline_markup(content: &str) -> String {
    emphasize_bold(content).replace('\n', "<br>")
}

/// Append `content` to `log` as a message from `sender`.
///
/// Bot messages carry `avatar` next to the bubble. The log is scrolled to
/// the end after every append.
pub fn append_message<L>(log: &mut L, content: &str, sender: Sender, avatar: &str)
where
    L: ConversationLog + ?Sized,
{
    let html = inline_markup(content);
    let entry = match sender {
        Sender::Bot => LogEntry::Bot {
            avatar: avatar.to_string(),
            html,
        },
        Sender::User => LogEntry::User { html },
    };

    log.append(entry);
    log.scroll_to_end();
}
