//! Interactive terminal session.
//!
//! Input lines are read on their own thread and arrive over a channel; AI
//! replies arrive over another. The session waits on both so an answer is
//! printed as soon as it lands, even while the user is idle.

use std::io::{self, BufRead, Write};
use std::thread;

use flume::{Receiver, Selector};

use crate::ai::{AiReply, ChatMessage, ChatSession};
use crate::calculator::{Calculator, format_display, strip_separators};
use crate::ui::{
    Command, HELP, Theme, copy_to_clipboard, parse_command, render_display, render_history,
    render_message, render_transcript,
};

const PROMPT: &str = "› ";

/// What the front end should do after a line was handled.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub quit: bool,
}

impl Outcome {
    fn show(output: String) -> Self {
        Self {
            output,
            quit: false,
        }
    }
}

/// Calculator, history and chat panel for one run of the program.
pub struct Session {
    calculator: Calculator,
    chat: ChatSession,
    theme: Theme,
}

impl Session {
    pub fn new(chat: ChatSession, theme: Theme) -> Self {
        Self {
            calculator: Calculator::new(),
            chat,
            theme,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Handle one input line.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => return Outcome::show(self.theme.paint(self.theme.error, &e.to_string())),
        };

        match command {
            Command::Keys(inputs) => {
                self.calculator.apply_all(inputs);
                Outcome::show(render_display(&self.calculator, &self.theme))
            }
            Command::History => Outcome::show(render_history(self.calculator.history(), &self.theme)),
            Command::Restore(n) => {
                if self.calculator.restore(n - 1) {
                    Outcome::show(render_display(&self.calculator, &self.theme))
                } else {
                    Outcome::show(self.theme.paint(
                        self.theme.error,
                        &format!("no history entry {}", n),
                    ))
                }
            }
            Command::ClearHistory => {
                self.calculator.clear_history();
                Outcome::show(render_history(self.calculator.history(), &self.theme))
            }
            Command::Copy => {
                let value = strip_separators(self.calculator.display_value());
                match copy_to_clipboard(&value) {
                    Ok(()) => Outcome::show(format!("copied {}", format_display(&value))),
                    Err(e) => {
                        tracing::warn!(error = %e, "clipboard copy failed");
                        Outcome::show(self.theme.paint(self.theme.error, &e.to_string()))
                    }
                }
            }
            Command::Ask(question) => {
                self.chat.ask(&question);
                Outcome::show(render_message(self.last_message(), &self.theme))
            }
            Command::Chat => Outcome::show(render_transcript(self.chat.transcript(), &self.theme)),
            Command::Help => Outcome::show(HELP.to_string()),
            Command::Quit => Outcome {
                output: String::new(),
                quit: true,
            },
        }
    }

    /// Render an AI reply that just arrived.
    pub fn handle_reply(&mut self, reply: AiReply) -> String {
        let message = self.chat.receive(reply);
        render_message(message, &self.theme)
    }

    /// The question just asked, or the error an unavailable assistant
    /// answered it with.
    fn last_message(&self) -> &ChatMessage {
        let messages = self.chat.transcript().messages();
        &messages[messages.len() - 1]
    }
}

enum Wake {
    Line(String),
    Reply(AiReply),
    RepliesClosed,
    InputClosed,
}

/// Run the interactive loop until `:quit` or end of input.
pub fn run(mut session: Session) -> anyhow::Result<()> {
    let lines = spawn_stdin_reader()?;
    let mut replies_open = session.chat().replies().is_some();

    println!("{}", render_display(session.calculator(), &session.theme));
    if let Some(reason) = session.chat().unavailable_reason() {
        let notice = format!("AI assistant disabled: {}", reason);
        println!("{}", session.theme.paint(session.theme.muted, &notice));
    }
    prompt()?;

    loop {
        let wake = match session.chat().replies() {
            Some(replies) if replies_open => wait(&lines, replies),
            _ => match lines.recv() {
                Ok(line) => Wake::Line(line),
                Err(_) => Wake::InputClosed,
            },
        };

        match wake {
            Wake::Line(line) => {
                let outcome = session.handle_line(&line);
                if outcome.quit {
                    break;
                }
                if !outcome.output.is_empty() {
                    println!("{}", outcome.output);
                }
            }
            Wake::Reply(reply) => {
                println!("\n{}", session.handle_reply(reply));
            }
            Wake::RepliesClosed => {
                tracing::warn!("AI reply channel closed");
                replies_open = false;
                continue;
            }
            Wake::InputClosed => break,
        }
        prompt()?;
    }

    Ok(())
}

fn wait(lines: &Receiver<String>, replies: &Receiver<AiReply>) -> Wake {
    Selector::new()
        .recv(lines, |line| match line {
            Ok(line) => Wake::Line(line),
            Err(_) => Wake::InputClosed,
        })
        .recv(replies, |reply| match reply {
            Ok(reply) => Wake::Reply(reply),
            Err(_) => Wake::RepliesClosed,
        })
        .wait()
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", PROMPT)?;
    stdout.flush()
}

/// Read stdin line by line on a background thread.
fn spawn_stdin_reader() -> io::Result<Receiver<String>> {
    let (tx, rx) = flume::unbounded();

    thread::Builder::new()
        .name("zcalc-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to read input");
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, MathSolver};
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use std::sync::Arc;
    use std::time::Duration;

    struct Answer42;

    impl MathSolver for Answer42 {
        fn solve(&self, _problem: String) -> BoxFuture<'static, Result<String, AiError>> {
            async { Ok("**42**".to_string()) }.boxed()
        }
    }

    fn offline_session() -> Session {
        let chat = ChatSession::new(Err(AiError::MissingCredential("GEMINI_API_KEY".into())));
        Session::new(chat, Theme::plain())
    }

    #[test]
    fn test_keys_update_display() {
        let mut session = offline_session();
        let outcome = session.handle_line("5 + 5 + 2 =");
        assert!(!outcome.quit);
        assert!(outcome.output.ends_with("= 12"));
        assert_eq!(session.calculator().history().len(), 2);
    }

    #[test]
    fn test_bad_keys_leave_state_untouched() {
        let mut session = offline_session();
        session.handle_line("12");
        let outcome = session.handle_line("3 $ 4");
        assert!(outcome.output.contains("unknown key"));
        assert_eq!(session.calculator().state().current_operand(), "12");
    }

    #[test]
    fn test_history_and_restore() {
        let mut session = offline_session();
        assert_eq!(
            session.handle_line(":history").output,
            "No calculation history yet."
        );

        session.handle_line("6 * 7 =");
        session.handle_line("1 + 1 =");
        let listing = session.handle_line(":history").output;
        assert!(listing.starts_with("  1. 1 + 1"));

        let outcome = session.handle_line(":restore 2");
        assert!(outcome.output.ends_with("42"));
        assert_eq!(session.calculator().state().current_operand(), "42");

        let outcome = session.handle_line(":restore 9");
        assert_eq!(outcome.output, "no history entry 9");
    }

    #[test]
    fn test_clear_history() {
        let mut session = offline_session();
        session.handle_line("1 + 1 =");
        session.handle_line(":clear-history");
        assert!(session.calculator().history().is_empty());
        assert!(session.calculator().state().last_result().is_some());
    }

    #[test]
    fn test_ask_without_credential() {
        let mut session = offline_session();
        let outcome = session.handle_line("? what is 6 times 7");
        assert!(outcome.output.contains("AI assistant unavailable"));
        assert!(session.calculator().state().is_initial());
    }

    #[test]
    fn test_ask_and_reply() {
        let chat = ChatSession::new(Ok(Arc::new(Answer42)));
        let mut session = Session::new(chat, Theme::plain());

        let outcome = session.handle_line(":ask 6 * 7");
        assert_eq!(outcome.output, "you › 6 * 7");

        let reply = session
            .chat()
            .replies()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(session.handle_reply(reply), " ai › 42");
        assert!(session.calculator().history().is_empty());
    }

    #[test]
    fn test_quit() {
        let mut session = offline_session();
        assert!(session.handle_line(":quit").quit);
    }
}
