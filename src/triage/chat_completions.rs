//! OpenAI-style `chat/completions` client.
//!
//! DeepSeek exposes the same wire format, so both providers share this
//! adapter and differ only in endpoint path, model and token limit.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{
    build_http_client, check_status, classify_send_error, non_empty, GenerationError,
    TextGenerator,
};
use crate::config::ProviderSettings;

const DEEPSEEK_MAX_TOKENS: u32 = 1000;

pub struct ChatCompletionsClient {
    name: &'static str,
    endpoint: String,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: Option<u32>,
    timeout: Duration,
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    fn new(
        name: &'static str,
        base_url: &str,
        path: &str,
        api_key: &str,
        model: &str,
        max_tokens: Option<u32>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            name,
            endpoint: format!("{base_url}{path}"),
            base_url,
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
            timeout,
            client: build_http_client(timeout)?,
        })
    }

    /// OpenAI at `{base}/v1/chat/completions`.
    pub fn openai(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Self::new("openai", base_url, "/v1/chat/completions", api_key, model, None, timeout)
    }

    /// DeepSeek at `{base}/chat/completions`.
    pub fn deepseek(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Self::new(
            "deepseek",
            base_url,
            "/chat/completions",
            api_key,
            model,
            Some(DEEPSEEK_MAX_TOKENS),
            timeout,
        )
    }

    pub fn openai_from_settings(
        settings: &ProviderSettings,
        timeout: Duration,
    ) -> Option<Result<Self, GenerationError>> {
        let key = settings.api_key.as_deref()?;
        Some(Self::openai(&settings.base_url, key, &settings.model, timeout))
    }

    pub fn deepseek_from_settings(
        settings: &ProviderSettings,
        timeout: Duration,
    ) -> Option<Result<Self, GenerationError>> {
        let key = settings.api_key.as_deref()?;
        Some(Self::deepseek(&settings.base_url, key, &settings.model, timeout))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    fn name(&self) -> &str {
        self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, &self.base_url, self.timeout))?;

        let parsed: ChatResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or(GenerationError::EmptyContent)?;
        non_empty(content)
    }
}
