//! Line formatter: bot reply text to an HTML fragment.
//!
//! Recognises `**bold**` spans, `- ` bullet items, `1. ` numbered items,
//! and turns every other line into a paragraph. The scan keeps a single
//! [`ListState`], so at most one list is ever open.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\s+").unwrap());
// ASCII digits only; `\d` would also accept other scripts' numerals.
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+").unwrap());

/// Replace every `**X**` with `<strong>X</strong>`.
///
/// Non-greedy, and spans never cross a newline.
pub fn emphasize_bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>").into_owned()
}

/// Which list, if any, is currently open during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    None,
    Bullet,
    Numbered,
}

impl ListState {
    fn open_tag(self) -> &'static str {
        match self {
            ListState::None => "",
            ListState::Bullet => "<ul>",
            ListState::Numbered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListState::None => "",
            ListState::Bullet => "</ul>",
            ListState::Numbered => "</ol>",
        }
    }

    /// Move to `next`, emitting the close/open tags the change requires.
    fn enter(self, next: ListState, out: &mut String) -> ListState {
        if self != next {
            out.push_str(self.close_tag());
            out.push_str(next.open_tag());
        }
        next
    }
}

/// Classification of one trimmed line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    BulletItem(&'a str),
    NumberedItem(&'a str),
    Paragraph(&'a str),
}

fn classify(trimmed: &str) -> Line<'_> {
    if BULLET.is_match(trimmed) {
        // Positional: the marker is assumed to be exactly "- ".
        let cut = trimmed
            .char_indices()
            .nth(2)
            .map_or(trimmed.len(), |(idx, _)| idx);
        Line::BulletItem(&trimmed[cut..])
    } else if let Some(marker) = NUMBERED.find(trimmed) {
        Line::NumberedItem(&trimmed[marker.end()..])
    } else {
        Line::Paragraph(trimmed)
    }
}

/// Convert raw reply text into an HTML fragment.
///
/// Bold substitution runs once over the whole text, then each `\n`-separated
/// line becomes a list item or a paragraph. Empty lines still produce an
/// empty `<p></p>`. Any list open at the end of the text is closed.
pub fn format_reply(text: &str) -> String {
    let text = emphasize_bold(text);
    let mut out = String::with_capacity(text.len() + 16);
    let mut state = ListState::None;

    for line in text.split('\n') {
        match classify(line.trim()) {
            Line::BulletItem(item) => {
                state = state.enter(ListState::Bullet, &mut out);
                out.push_str("<li>");
                out.push_str(item);
                out.push_str("</li>");
            }
            Line::NumberedItem(item) => {
                state = state.enter(ListState::Numbered, &mut out);
                out.push_str("<li>");
                out.push_str(item);
                out.push_str("</li>");
            }
            Line::Paragraph(para) => {
                state = state.enter(ListState::None, &mut out);
                out.push_str("<p>");
                out.push_str(para);
                out.push_str("</p>");
            }
        }
    }

    state.enter(ListState::None, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_trimmed_paragraph() {
        assert_eq!(format_reply("  hello world \t"), "<p>hello world</p>");
    }

    #[test]
    fn empty_text_is_an_empty_paragraph() {
        assert_eq!(format_reply(""), "<p></p>");
    }

    #[test]
    fn blank_lines_still_emit_paragraphs() {
        assert_eq!(format_reply("a\n\nb"), "<p>a</p><p></p><p>b</p>");
    }

    #[test]
    fn bullet_lines_form_a_single_list() {
        assert_eq!(
            format_reply("- one\n- two\n- three"),
            "<ul><li>one</li><li>two</li><li>three</li></ul>"
        );
    }

    #[test]
    fn numbered_lines_strip_multi_digit_markers() {
        assert_eq!(
            format_reply("9. Nine\n10. Ten\n11.   Eleven"),
            "<ol><li>Nine</li><li>Ten</li><li>Eleven</li></ol>"
        );
    }

    #[test]
    fn lists_close_before_trailing_paragraph() {
        assert_eq!(
            format_reply("Intro\n- a\n- b\nOutro"),
            "<p>Intro</p><ul><li>a</li><li>b</li></ul><p>Outro</p>"
        );
    }

    #[test]
    fn list_open_at_end_of_text_is_closed() {
        assert_eq!(format_reply("Steps:\n1. rest"), "<p>Steps:</p><ol><li>rest</li></ol>");
    }

    #[test]
    fn switching_list_kind_closes_previous_list() {
        assert_eq!(
            format_reply("1. first\n- aside\n2. second"),
            "<ol><li>first</li></ol><ul><li>aside</li></ul><ol><li>second</li></ol>"
        );
    }

    #[test]
    fn bullet_stripping_is_positional() {
        // Only two characters are dropped, whatever the marker looked like.
        assert_eq!(format_reply("-  wide"), "<ul><li> wide</li></ul>");
        assert_eq!(format_reply("-\ttab"), "<ul><li>tab</li></ul>");
    }

    #[test]
    fn indented_markers_are_recognised_after_trim() {
        assert_eq!(format_reply("   - nested"), "<ul><li>nested</li></ul>");
    }

    #[test]
    fn hyphen_without_space_is_a_paragraph() {
        assert_eq!(format_reply("-5 degrees"), "<p>-5 degrees</p>");
        assert_eq!(format_reply("3.14 is pi"), "<p>3.14 is pi</p>");
    }

    #[test]
    fn bold_is_applied_before_line_logic() {
        assert_eq!(
            format_reply("**bold** text"),
            "<p><strong>bold</strong> text</p>"
        );
        assert_eq!(
            format_reply("- **Recovery**: rest"),
            "<ul><li><strong>Recovery</strong>: rest</li></ul>"
        );
    }

    #[test]
    fn bold_is_non_greedy_and_single_line() {
        assert_eq!(
            emphasize_bold("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
        assert_eq!(emphasize_bold("**a\nb**"), "**a\nb**");
    }

    #[test]
    fn multibyte_bullet_content_is_kept_intact() {
        assert_eq!(format_reply("- 👩‍⚕️ nurse"), "<ul><li>👩‍⚕️ nurse</li></ul>");
    }

    #[test]
    fn classify_distinguishes_line_kinds() {
        assert_eq!(classify("- x"), Line::BulletItem("x"));
        assert_eq!(classify("12. x"), Line::NumberedItem("x"));
        assert_eq!(classify("x"), Line::Paragraph("x"));
    }
}
