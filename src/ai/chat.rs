//! Chat session: transcript plus the worker that answers questions.

use std::sync::Arc;

use flume::Receiver;

use super::transcript::{ChatMessage, Transcript};
use super::worker::{AiReply, AiRequest, AiWorker};
use super::{AiError, MathSolver};

/// Shown in place of an answer when a query fails.
pub const FAILURE_MESSAGE: &str =
    "Sorry, I encountered an error connecting to the AI service. Please try again.";

enum Backend {
    Ready(AiWorker),
    /// Startup failed; every question is answered with this reason.
    Unavailable(String),
}

pub struct ChatSession {
    transcript: Transcript,
    backend: Backend,
}

impl ChatSession {
    /// Start a session around a solver, or around the reason there is none.
    pub fn new(solver: Result<Arc<dyn MathSolver>, AiError>) -> Self {
        let backend = match solver {
            Ok(solver) => match AiWorker::spawn(solver) {
                Ok(worker) => Backend::Ready(worker),
                Err(e) => {
                    tracing::error!(error = %e, "failed to spawn AI worker");
                    Backend::Unavailable(e.to_string())
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "AI assistant disabled");
                Backend::Unavailable(e.to_string())
            }
        };

        Self {
            transcript: Transcript::new(),
            backend,
        }
    }

    /// Why the assistant could not start, if it could not.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.backend {
            Backend::Ready(_) => None,
            Backend::Unavailable(reason) => Some(reason),
        }
    }

    /// Send a question. Blank text is ignored and returns `None`.
    ///
    /// Questions never wait on each other; several may be in flight.
    pub fn ask(&mut self, text: &str) -> Option<u64> {
        let problem = text.trim();
        if problem.is_empty() {
            return None;
        }

        let question_id = self.transcript.push_question(problem.to_string());
        match &self.backend {
            Backend::Ready(worker) => {
                let request = AiRequest {
                    question_id,
                    problem: problem.to_string(),
                };
                if let Err(e) = worker.submit(request) {
                    tracing::error!(error = %e, "failed to queue AI request");
                    self.transcript.push_failure(FAILURE_MESSAGE.to_string());
                }
            }
            Backend::Unavailable(reason) => {
                let message = format!("AI assistant unavailable: {}", reason);
                self.transcript.push_failure(message);
            }
        }

        Some(question_id)
    }

    /// Channel replies arrive on, if the assistant is running.
    pub fn replies(&self) -> Option<&Receiver<AiReply>> {
        match &self.backend {
            Backend::Ready(worker) => Some(worker.replies()),
            Backend::Unavailable(_) => None,
        }
    }

    /// Append a reply to the transcript and return the new message.
    pub fn receive(&mut self, reply: AiReply) -> &ChatMessage {
        match reply.outcome {
            Ok(answer) => {
                tracing::debug!(question_id = reply.question_id, "AI answer received");
                self.transcript.push_answer(answer);
            }
            Err(e) => {
                tracing::error!(question_id = reply.question_id, error = %e, "AI query failed");
                self.transcript.push_failure(FAILURE_MESSAGE.to_string());
            }
        }

        let messages = self.transcript.messages();
        &messages[messages.len() - 1]
    }

    /// Apply every reply that has already arrived. Returns how many there were.
    pub fn drain(&mut self) -> usize {
        let replies: Vec<AiReply> = match self.replies() {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };

        let count = replies.len();
        for reply in replies {
            self.receive(reply);
        }
        count
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Role;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use std::time::Duration;

    struct FixedSolver(Result<&'static str, &'static str>);

    impl MathSolver for FixedSolver {
        fn solve(&self, _problem: String) -> BoxFuture<'static, Result<String, AiError>> {
            let outcome = self
                .0
                .map(String::from)
                .map_err(|e| AiError::Request(e.to_string()));
            async move { outcome }.boxed()
        }
    }

    fn session(outcome: Result<&'static str, &'static str>) -> ChatSession {
        ChatSession::new(Ok(Arc::new(FixedSolver(outcome))))
    }

    fn wait_for_reply(chat: &mut ChatSession) {
        let reply = chat
            .replies()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        chat.receive(reply);
    }

    #[test]
    fn test_answer_lands_in_transcript() {
        let mut chat = session(Ok("**4**"));
        assert_eq!(chat.unavailable_reason(), None);

        chat.ask("  2 + 2  ").unwrap();
        assert!(chat.transcript().is_thinking());
        wait_for_reply(&mut chat);

        let messages = chat.transcript().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "2 + 2");
        assert_eq!(messages[2].content, "**4**");
        assert!(!messages[2].is_error);
        assert!(!chat.transcript().is_thinking());
    }

    #[test]
    fn test_failure_flagged_and_session_usable() {
        let mut chat = session(Err("network down"));
        chat.ask("1 + 1");
        wait_for_reply(&mut chat);

        let last = chat.transcript().messages().last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.content, FAILURE_MESSAGE);

        assert!(chat.ask("2 + 2").is_some());
    }

    #[test]
    fn test_blank_question_ignored() {
        let mut chat = session(Ok("x"));
        assert_eq!(chat.ask("   "), None);
        assert_eq!(chat.transcript().messages().len(), 1);
    }

    #[test]
    fn test_unavailable_assistant() {
        let mut chat = ChatSession::new(Err(AiError::MissingCredential("GEMINI_API_KEY".into())));
        assert!(chat.replies().is_none());
        assert!(chat.unavailable_reason().unwrap().contains("GEMINI_API_KEY"));

        chat.ask("what is pi?");
        let last = chat.transcript().messages().last().unwrap();
        assert!(last.is_error);
        assert!(last.content.contains("GEMINI_API_KEY"));
        assert!(!chat.transcript().is_thinking());
        assert_eq!(chat.drain(), 0);
    }

    #[test]
    fn test_concurrent_questions() {
        let mut chat = session(Ok("ok"));
        chat.ask("first");
        chat.ask("second");

        let mut received = 0;
        while received < 2 {
            wait_for_reply(&mut chat);
            received += 1;
        }
        assert_eq!(chat.transcript().messages().len(), 5);
        assert!(!chat.transcript().is_thinking());
    }
}
