//! Markdown to terminal text.
//!
//! Model replies use light Markdown (bold answers, numbered steps). Emphasis
//! becomes ANSI attributes and list items become bullets or numbers.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::ui::theme::Theme;

pub fn render_markdown(text: &str, theme: &Theme) -> String {
    let mut out = String::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    // One entry per open list: the next number for ordered lists.
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Strong) | Event::Start(Tag::Heading { .. }) => {
                bold += 1;
                out.push_str(theme.bold);
            }
            Event::End(TagEnd::Strong) => {
                bold = bold.saturating_sub(1);
                restyle(&mut out, theme, bold, italic);
            }
            Event::End(TagEnd::Heading(_)) => {
                bold = bold.saturating_sub(1);
                restyle(&mut out, theme, bold, italic);
                out.push_str("\n\n");
            }
            Event::Start(Tag::Emphasis) => {
                italic += 1;
                out.push_str(theme.italic);
            }
            Event::End(TagEnd::Emphasis) => {
                italic = italic.saturating_sub(1);
                restyle(&mut out, theme, bold, italic);
            }
            Event::Start(Tag::List(start)) => {
                end_line(&mut out);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let depth = lists.len().saturating_sub(1);
                out.push_str(&"  ".repeat(depth));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => end_line(&mut out),
            Event::End(TagEnd::Paragraph) => {
                if lists.is_empty() {
                    out.push_str("\n\n");
                } else {
                    end_line(&mut out);
                }
            }
            Event::Start(Tag::CodeBlock(_)) => end_line(&mut out),
            Event::End(TagEnd::CodeBlock) => out.push('\n'),
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str("────────\n\n"),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Close the current styles and reopen whichever are still active.
fn restyle(out: &mut String, theme: &Theme, bold: usize, italic: usize) {
    out.push_str(theme.reset);
    if bold > 0 {
        out.push_str(theme.bold);
    }
    if italic > 0 {
        out.push_str(theme.italic);
    }
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_bold_answer() {
        assert_eq!(render_markdown("**10**", &Theme::plain()), "10");
    }

    #[test]
    fn test_ansi_bold() {
        assert_eq!(
            render_markdown("The answer is **42**.", &Theme::ansi()),
            "The answer is \x1b[1m42\x1b[0m."
        );
    }

    #[test]
    fn test_numbered_steps() {
        let text = "Steps:\n\n1. Subtract 5\n2. Divide by 3\n\n**x = 5**";
        assert_eq!(
            render_markdown(text, &Theme::plain()),
            "Steps:\n\n1. Subtract 5\n2. Divide by 3\n\nx = 5"
        );
    }

    #[test]
    fn test_bullets() {
        assert_eq!(
            render_markdown("- one\n- two", &Theme::plain()),
            "• one\n• two"
        );
    }

    #[test]
    fn test_nested_emphasis_reopens_bold() {
        let t = Theme::ansi();
        let rendered = render_markdown("**a *b* c**", &t);
        assert_eq!(
            rendered,
            "\x1b[1ma \x1b[3mb\x1b[0m\x1b[1m c\x1b[0m"
        );
    }
}
