use std::sync::Arc;
use std::time::Duration;

use super::canned::match_canned;
use super::chain::FallbackChain;
use super::chat_completions::ChatCompletionsClient;
use super::gemini::GeminiClient;
use super::prompt::build_analysis_prompt;
use super::provider::{GenerationError, TextGenerator};
use super::{SymptomCategory, TriageError};
use crate::config::AppConfig;

/// Entry point for symptom analysis.
///
/// Holds only read-only provider handles, so one instance is shared by all
/// request handlers.
pub struct SymptomDispatcher {
    chain: FallbackChain,
}

impl SymptomDispatcher {
    pub fn new(chain: FallbackChain) -> Self {
        Self { chain }
    }

    /// Build the Gemini → OpenAI → DeepSeek chain from configuration.
    ///
    /// Providers without credentials are skipped with a warning.
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let timeout: Duration = config.provider_timeout;
        let mut chain = FallbackChain::default();

        match GeminiClient::from_settings(&config.gemini, timeout) {
            Some(client) => chain.push(Arc::new(client?)),
            None => tracing::warn!("GOOGLE_AI_KEY not set, Gemini disabled"),
        }
        match ChatCompletionsClient::openai_from_settings(&config.openai, timeout) {
            Some(client) => chain.push(Arc::new(client?)),
            None => tracing::warn!("OPENAI_API_KEY not set, OpenAI fallback disabled"),
        }
        match ChatCompletionsClient::deepseek_from_settings(&config.deepseek, timeout) {
            Some(client) => chain.push(Arc::new(client?)),
            None => tracing::warn!("DEEPSEEK_API_KEY not set, DeepSeek fallback disabled"),
        }

        if chain.is_empty() {
            tracing::warn!("No AI provider configured; only canned answers will succeed");
        } else {
            tracing::info!(providers = ?chain.provider_names(), "AI provider chain ready");
        }

        Ok(Self::new(chain))
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.chain.provider_names()
    }

    /// Produce an analysis for already-validated input.
    ///
    /// Canned answers are checked first and ignore `category` entirely.
    pub async fn analyze(
        &self,
        category: SymptomCategory,
        symptoms: &str,
    ) -> Result<String, TriageError> {
        if let Some(answer) = match_canned(symptoms) {
            tracing::debug!(entry = answer.name, "Canned answer matched");
            return Ok(answer.response.to_string());
        }

        let prompt = build_analysis_prompt(category, symptoms);
        self.chain.run(&prompt).await
    }
}

impl From<Vec<Arc<dyn TextGenerator>>> for SymptomDispatcher {
    fn from(providers: Vec<Arc<dyn TextGenerator>>) -> Self {
        Self::new(FallbackChain::new(providers))
    }
}
