//! AI math assistant.
//!
//! Free-text questions go to an external model on a background worker and
//! the answers land in a chat transcript. Nothing here touches the
//! calculator state or its history.

mod chat;
mod error;
mod solver;
mod transcript;
mod worker;

pub use chat::{ChatSession, FAILURE_MESSAGE};
pub use error::AiError;
pub use solver::{EMPTY_REPLY, GeminiSolver, MathSolver, SYSTEM_PROMPT, non_empty_reply};
pub use transcript::{ChatMessage, Role, Transcript, WELCOME_MESSAGE};
pub use worker::{AiReply, AiRequest, AiWorker};
