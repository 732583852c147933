//! The external model that answers math questions.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use super::AiError;
use crate::config::AiSettings;

/// Instruction sent with every question.
pub const SYSTEM_PROMPT: &str = "You are an expert mathematician and calculator assistant.
Your goal is to solve the user's math problem accurately and concisely.

Rules:
1. If the input is a direct calculation (e.g., \"5 + 5\"), simply provide the result.
2. If the input is a word problem, briefly explain the steps and then provide the final answer clearly.
3. Use Markdown for formatting (bold for final answers).
4. Keep explanations purely mathematical and to the point.";

/// Reply used when the model answers with nothing.
pub const EMPTY_REPLY: &str = "I couldn't generate a solution. Please try again.";

/// Something that turns a free-text math problem into a textual answer.
pub trait MathSolver: Send + Sync {
    fn solve(&self, problem: String) -> BoxFuture<'static, Result<String, AiError>>;
}

/// Google Gemini through the `llm` crate.
pub struct GeminiSolver {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl GeminiSolver {
    /// Build the client. A missing API key is a configuration failure.
    pub fn from_settings(settings: &AiSettings) -> Result<Self, AiError> {
        let api_key = settings
            .api_key()
            .ok_or_else(|| AiError::MissingCredential(settings.key_variables()))?;

        let provider = LLMBuilder::new()
            .backend(LLMBackend::Google)
            .api_key(api_key)
            .model(settings.model.clone())
            .temperature(settings.temperature)
            .system(SYSTEM_PROMPT)
            .build()
            .map_err(|e| AiError::Client(e.to_string()))?;

        tracing::info!(model = %settings.model, "AI assistant ready");

        Ok(Self {
            provider: provider.into(),
            model: settings.model.clone(),
        })
    }
}

impl MathSolver for GeminiSolver {
    fn solve(&self, problem: String) -> BoxFuture<'static, Result<String, AiError>> {
        let provider = Arc::clone(&self.provider);
        let model = self.model.clone();

        async move {
            tracing::debug!(%model, chars = problem.len(), "sending math problem");
            let messages = vec![ChatMessage::user().content(problem).build()];

            let response = provider.chat(&messages).await.map_err(|e| {
                tracing::error!(%model, error = %e, "AI request failed");
                AiError::Request(e.to_string())
            })?;

            Ok(non_empty_reply(response.text()))
        }
        .boxed()
    }
}

/// Substitute [`EMPTY_REPLY`] for a missing or blank answer.
pub fn non_empty_reply(text: Option<String>) -> String {
    text.filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}
