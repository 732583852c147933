//! Chat transcript rendering.

use crate::ai::{ChatMessage, Role, Transcript};
use crate::ui::markdown::render_markdown;
use crate::ui::theme::Theme;

pub const THINKING: &str = "Thinking...";

/// Render one message with a role prefix. Model replies go through the
/// Markdown renderer; failures are painted in the error color.
pub fn render_message(message: &ChatMessage, theme: &Theme) -> String {
    match message.role {
        Role::User => format!("{} {}", theme.paint(theme.accent, "you ›"), message.content),
        Role::Model if message.is_error => format!(
            "{} {}",
            theme.paint(theme.error, " ai ›"),
            theme.paint(theme.error, &message.content)
        ),
        Role::Model => format!(
            "{} {}",
            theme.paint(theme.muted, " ai ›"),
            indent_continuation(&render_markdown(&message.content, theme))
        ),
    }
}

/// The whole transcript, oldest first, with a thinking indicator while
/// questions are in flight.
pub fn render_transcript(transcript: &Transcript, theme: &Theme) -> String {
    let mut blocks: Vec<String> = transcript
        .messages()
        .iter()
        .map(|m| render_message(m, theme))
        .collect();

    if transcript.is_thinking() {
        blocks.push(format!(
            "{} {}",
            theme.paint(theme.muted, " ai ›"),
            theme.paint(theme.italic, THINKING)
        ));
    }

    blocks.join("\n")
}

/// Align wrapped reply lines under the first one.
fn indent_continuation(text: &str) -> String {
    text.replace('\n', "\n      ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript() {
        let mut transcript = Transcript::new();
        transcript.push_question("2 + 2".into());
        let rendered = render_transcript(&transcript, &Theme::plain());
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with(" ai › Hello!"));
        assert_eq!(lines[1], "you › 2 + 2");
        assert_eq!(lines[2], " ai › Thinking...");

        transcript.push_answer("**4**".into());
        let rendered = render_transcript(&transcript, &Theme::plain());
        assert!(rendered.ends_with(" ai › 4"));
        assert!(!rendered.contains(THINKING));
    }

    #[test]
    fn test_multiline_reply_indented() {
        let mut transcript = Transcript::new();
        transcript.push_question("q".into());
        transcript.push_answer("line one\n\n**two**".into());
        let message = transcript.messages().last().unwrap();

        assert_eq!(
            render_message(message, &Theme::plain()),
            " ai › line one\n      \n      two"
        );
    }

    #[test]
    fn test_error_message_painted() {
        let mut transcript = Transcript::new();
        transcript.push_question("q".into());
        transcript.push_failure("failed".into());
        let message = transcript.messages().last().unwrap();

        let theme = Theme::ansi();
        let rendered = render_message(message, &theme);
        assert!(rendered.contains("\x1b[31mfailed\x1b[0m"));
    }
}
