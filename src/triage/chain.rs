use std::sync::Arc;

use super::provider::{GenerationError, TextGenerator};
use super::TriageError;

/// Outcome of one provider call, kept only for logging.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    Success,
    Failure(GenerationError),
}

#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    pub provider: String,
    pub outcome: AttemptOutcome,
}

/// Ordered providers tried one after another until one succeeds.
#[derive(Clone, Default)]
pub struct FallbackChain {
    providers: Vec<Arc<dyn TextGenerator>>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Arc<dyn TextGenerator>>) -> Self {
        Self { providers }
    }

    /// Append a provider at the lowest priority.
    pub fn push(&mut self, provider: Arc<dyn TextGenerator>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Run the prompt through each provider in order and return the first success.
    ///
    /// Each attempt completes before the next starts. Failures are logged and
    /// collected; only total exhaustion is reported to the caller.
    pub async fn run(&self, prompt: &str) -> Result<String, TriageError> {
        let mut attempts: Vec<ProviderAttempt> = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            tracing::info!(provider = provider.name(), "Requesting symptom analysis");
            match provider.generate(prompt).await {
                Ok(text) => {
                    attempts.push(ProviderAttempt {
                        provider: provider.name().to_string(),
                        outcome: AttemptOutcome::Success,
                    });
                    tracing::info!(
                        provider = provider.name(),
                        attempts = attempts.len(),
                        "Symptom analysis generated"
                    );
                    return Ok(text);
                }
                Err(err) => {
                    tracing::warn!(provider = provider.name(), error = %err, "Provider failed");
                    attempts.push(ProviderAttempt {
                        provider: provider.name().to_string(),
                        outcome: AttemptOutcome::Failure(err),
                    });
                }
            }
        }

        let summary: Vec<String> = attempts
            .iter()
            .map(|a| match &a.outcome {
                AttemptOutcome::Failure(e) => format!("{}: {e}", a.provider),
                AttemptOutcome::Success => format!("{}: ok", a.provider),
            })
            .collect();
        tracing::error!(
            attempted = attempts.len(),
            failures = ?summary,
            "All AI providers failed"
        );
        Err(TriageError::AllProvidersUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::provider::MockGenerator;

    fn chain_of(mocks: &[Arc<MockGenerator>]) -> FallbackChain {
        FallbackChain::new(
            mocks
                .iter()
                .map(|m| m.clone() as Arc<dyn TextGenerator>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn first_success_stops_the_chain() {
        let a = Arc::new(MockGenerator::succeeding("a", "from a"));
        let b = Arc::new(MockGenerator::succeeding("b", "from b"));
        let chain = chain_of(&[a.clone(), b.clone()]);

        assert_eq!(chain.run("prompt").await.unwrap(), "from a");
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn falls_through_to_the_next_provider() {
        let a = Arc::new(MockGenerator::failing("a"));
        let b = Arc::new(MockGenerator::succeeding("b", "from b"));
        let c = Arc::new(MockGenerator::succeeding("c", "from c"));
        let chain = chain_of(&[a.clone(), b.clone(), c.clone()]);

        assert_eq!(chain.run("prompt").await.unwrap(), "from b");
        assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 0));
    }

    #[tokio::test]
    async fn every_provider_sees_the_same_prompt() {
        let a = Arc::new(MockGenerator::failing("a"));
        let b = Arc::new(MockGenerator::failing("b"));
        let chain = chain_of(&[a.clone(), b.clone()]);

        let _ = chain.run("the prompt").await;
        assert_eq!(a.prompts(), vec!["the prompt"]);
        assert_eq!(b.prompts(), vec!["the prompt"]);
    }

    #[tokio::test]
    async fn exhaustion_returns_unified_error() {
        let a = Arc::new(MockGenerator::failing("a"));
        let b = Arc::new(MockGenerator::scripted(
            "b",
            vec![Err(GenerationError::EmptyContent)],
        ));
        let c = Arc::new(MockGenerator::scripted(
            "c",
            vec![Err(GenerationError::Timeout(60))],
        ));
        let chain = chain_of(&[a.clone(), b.clone(), c.clone()]);

        let err = chain.run("prompt").await.unwrap_err();
        assert_eq!(err, TriageError::AllProvidersUnavailable);
        assert!(!err.to_string().contains("overloaded"));
        assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 1));
    }

    #[tokio::test]
    async fn empty_chain_is_unavailable() {
        let chain = FallbackChain::default();
        assert!(chain.is_empty());
        assert_eq!(
            chain.run("prompt").await.unwrap_err(),
            TriageError::AllProvidersUnavailable
        );
    }

    #[test]
    fn push_appends_at_lowest_priority() {
        let mut chain = FallbackChain::default();
        chain.push(Arc::new(MockGenerator::failing("gemini")));
        chain.push(Arc::new(MockGenerator::failing("openai")));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.provider_names(), vec!["gemini", "openai"]);
    }
}
