//! Chat transcript shown in the assistant panel.

use serde::{Deserialize, Serialize};

use crate::history::now_millis;

/// Greeting the transcript starts with.
pub const WELCOME_MESSAGE: &str = "Hello! I am your AI Math Assistant. Ask me to solve complex problems, explain concepts, or convert units.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Set when the message reports a failed query.
    #[serde(default)]
    pub is_error: bool,
}

/// Messages oldest first, plus the number of queries still in flight.
#[derive(Clone, Debug)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 0,
            pending: 0,
        };
        transcript.push(Role::Model, WELCOME_MESSAGE.to_string(), false);
        transcript
    }

    /// Append the user's question and count it as in flight.
    pub fn push_question(&mut self, content: String) -> u64 {
        self.pending += 1;
        self.push(Role::User, content, false)
    }

    /// Append the model's answer to a question in flight.
    pub fn push_answer(&mut self, content: String) -> u64 {
        self.pending = self.pending.saturating_sub(1);
        self.push(Role::Model, content, false)
    }

    /// Append an error-flagged model message for a failed question.
    pub fn push_failure(&mut self, content: String) -> u64 {
        self.pending = self.pending.saturating_sub(1);
        self.push(Role::Model, content, true)
    }

    fn push(&mut self, role: Role, content: String, is_error: bool) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            timestamp: now_millis(),
            is_error,
        });
        id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while at least one question is waiting for an answer.
    pub fn is_thinking(&self) -> bool {
        self.pending > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_welcome() {
        let transcript = Transcript::new();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, Role::Model);
        assert_eq!(transcript.messages()[0].content, WELCOME_MESSAGE);
        assert!(!transcript.is_thinking());
    }

    #[test]
    fn test_pending_tracking() {
        let mut transcript = Transcript::new();
        transcript.push_question("2 + 2".into());
        transcript.push_question("3 + 3".into());
        assert!(transcript.is_thinking());

        transcript.push_answer("4".into());
        assert!(transcript.is_thinking());
        transcript.push_failure("oops".into());
        assert!(!transcript.is_thinking());

        let last = transcript.messages().last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.role, Role::Model);
    }

    #[test]
    fn test_ids_increase() {
        let mut transcript = Transcript::new();
        let a = transcript.push_question("a".into());
        let b = transcript.push_answer("b".into());
        assert!(b > a);
    }

    #[test]
    fn test_serializes_role_lowercase() {
        let transcript = Transcript::new();
        let json = serde_json::to_value(&transcript.messages()[0]).unwrap();
        assert_eq!(json["role"], "model");
        assert_eq!(json["is_error"], false);
    }
}
