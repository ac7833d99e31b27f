//! Abstractions for summarizing a single chunk of text.
//!
//! When a backend credential is configured, chunks are sent to an OpenAI-compatible
//! chat-completions endpoint. Without one, a deterministic extractive summarizer takes over and
//! never touches the network. The choice is made once, from an explicit [`BackendConfig`].

mod chat;
mod fallback;
pub mod prompts;

use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;

pub use chat::ChatCompletionsClient;
pub use fallback::{FallbackSummarizer, split_sentences};

/// Errors surfaced while summarizing a chunk.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Backend could not be reached or the HTTP client failed before a response arrived.
    #[error("Summarization backend unavailable: {0}")]
    ProviderUnavailable(String),
    /// Backend answered with a non-success status.
    #[error("Model call failed ({status}): {body}")]
    GenerationFailed {
        /// HTTP status returned by the backend.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },
    /// Backend response could not be decoded.
    #[error("Malformed backend response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by chunk summarizers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Summarize one chunk using the shared instruction prompt.
    async fn summarize(&self, prompt: &str, chunk: &str)
    -> Result<String, SummarizationClientError>;

    /// Short provider label used in logs.
    fn provider(&self) -> &'static str;
}

/// Build the summarizer selected by the backend configuration.
///
/// A missing credential is not an error: it selects [`FallbackSummarizer`].
pub fn build_summarization_client(
    config: &BackendConfig,
) -> Result<Arc<dyn SummarizationClient>, SummarizationClientError> {
    match config.api_key.as_deref() {
        None => {
            tracing::info!("No backend credential configured; using fallback summaries");
            Ok(Arc::new(FallbackSummarizer))
        }
        Some(api_key) => {
            tracing::info!(
                model = %config.model,
                base_url = %config.base_url,
                "Using chat-completions backend"
            );
            Ok(Arc::new(ChatCompletionsClient::new(
                config.base_url.clone(),
                api_key.to_string(),
                config.model.clone(),
            )?))
        }
    }
}
