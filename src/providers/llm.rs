use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::ProviderError;

const PROVIDER: &str = "llm";

/// Client for an OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl LlmClient {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    pub async fn chat(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        self.chat_inner(system, user, None).await
    }

    /// Same as [`chat`](Self::chat) but aborts the whole call after `timeout`.
    /// Used for long script rewrites where the UI enforces an overall ceiling.
    pub async fn chat_with_timeout(
        &self,
        system: &str,
        user: &str,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        self.chat_inner(system, user, Some(timeout)).await
    }

    async fn chat_inner(
        &self,
        system: &str,
        user: &str,
        timeout: Option<Duration>,
    ) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ProviderError::Malformed {
                provider: PROVIDER,
                detail: "no choices in completion".to_string(),
            })?;

        Ok(content)
    }
}
