use thiserror::Error;

/// Failures of the AI math assistant.
///
/// These never reach the calculator; the chat session turns them into an
/// error-flagged transcript message.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key found, set {0}")]
    MissingCredential(String),

    #[error("failed to build AI client: {0}")]
    Client(String),

    #[error("AI request failed: {0}")]
    Request(String),

    #[error("AI worker is not running")]
    WorkerGone,
}
