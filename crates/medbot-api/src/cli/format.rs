//! `medbot format`: run the line formatter over a file or stdin.

use std::path::Path;

use tokio::io::AsyncReadExt;

use medbot_core::format::format_reply;
use medbot_core::log::{HtmlLog, append_message};
use medbot_types::chat::Sender;

/// Format `text` as a bot reply; with `page`, wrap it in a rendered chat box.
pub fn render(text: &str, page: bool, avatar: &str) -> String {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let html = format_reply(text);
    if !page {
        return html;
    }

    let mut log = HtmlLog::new();
    append_message(&mut log, &html, Sender::Bot, avatar);
    log.render()
}

pub async fn format_text(file: Option<&Path>, page: bool, avatar: &str) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    println!("{}", render(&text, page, avatar));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_fragment() {
        let text = "**Rest**\n- fluids\n- sleep\n";
        assert_eq!(
            render(text, false, "👩‍⚕️"),
            "<p><strong>Rest</strong></p><ul><li>fluids</li><li>sleep</li></ul>"
        );
    }

    #[test]
    fn test_render_page_wraps_bot_message() {
        let out = render("hello", true, "🩺");
        assert!(out.starts_with("<div id=\"chat-box\""));
        assert!(out.contains("bot-message-container"));
        assert!(out.contains("🩺"));
        assert!(out.contains("<p>hello</p>"));
        assert!(!out.contains("user-message"));
    }

    #[tokio::test]
    async fn test_format_text_reads_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        tokio::fs::write(tmp.path(), "1. one\n2. two\n").await.unwrap();
        format_text(Some(tmp.path()), false, "👩‍⚕️").await.unwrap();
    }
}
