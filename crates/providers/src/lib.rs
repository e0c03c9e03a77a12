//! Completion providers for the support chat.
//!
//! A provider turns one fully built prompt into the model's reply text. It
//! reports transport and HTTP failures as errors; turning those into
//! user-facing fallback messages is the caller's job.

pub mod gemini;

pub use gemini::GeminiClient;

use anyhow::Result;

#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider identifier, used in logs.
    fn id(&self) -> &'static str;

    /// Send `prompt` and return the first candidate's text.
    ///
    /// `Ok(None)` means the call succeeded but the response carried no text.
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<Option<String>>;
}
