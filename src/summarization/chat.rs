use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{
    SummarizationClient, SummarizationClientError,
    prompts::{SYSTEM_INSTRUCTION, user_message},
};

/// Sampling temperature for summaries; kept low for stable output.
const TEMPERATURE: f32 = 0.2;

/// Client for OpenAI-compatible `/chat/completions` endpoints (Groq by default).
pub struct ChatCompletionsClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    /// Build a client for the given endpoint root, credential, and model.
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
    ) -> Result<Self, SummarizationClientError> {
        let http = Client::builder()
            .user_agent("docsum/summary")
            .build()
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to construct HTTP client: {error}"
                ))
            })?;
        Ok(Self {
            http,
            base_url,
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl SummarizationClient for ChatCompletionsClient {
    async fn summarize(
        &self,
        prompt: &str,
        chunk: &str,
    ) -> Result<String, SummarizationClientError> {
        let user_content = user_message(prompt, chunk);
        let payload = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach {}: {error}",
                    self.base_url
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, model = %self.model, "Model call rejected");
            return Err(SummarizationClientError::GenerationFailed { status, body });
        }

        let body: ChatResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode completion: {error}"
            ))
        })?;

        Ok(body.into_content())
    }

    fn provider(&self) -> &'static str {
        "chat-completions"
    }
}
