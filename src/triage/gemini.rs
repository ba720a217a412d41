use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{
    build_http_client, check_status, classify_send_error, non_empty, GenerationError,
    TextGenerator,
};
use crate::config::ProviderSettings;

/// Header carrying the API key. The key never goes in the URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini client using the `generateContent` REST endpoint.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout,
            client: build_http_client(timeout)?,
        })
    }

    /// Build from settings. `None` when no API key is configured.
    pub fn from_settings(
        settings: &ProviderSettings,
        timeout: Duration,
    ) -> Option<Result<Self, GenerationError>> {
        let key = settings.api_key.as_deref()?;
        Some(Self::new(&settings.base_url, key, &settings.model, timeout))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn extract_text(parsed: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    non_empty(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, &self.base_url, self.timeout))?;

        let parsed: GenerateContentResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        extract_text(parsed)
    }
}
