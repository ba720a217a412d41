use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single provider call. Recovered by the chain, never shown to patients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Provider unreachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Provider returned error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned no content")]
    EmptyContent,
}

/// An external text-generation backend.
///
/// Adapters are held by the fallback chain for the process lifetime and
/// shared across requests, so implementations must not carry per-call state.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Stable identifier used in logs.
    fn name(&self) -> &str;

    /// Generate text for a single prompt. One request, no internal retries.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Build the shared HTTP client for a provider adapter.
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, GenerationError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| GenerationError::HttpClient(e.to_string()))
}

/// Map a transport failure from `reqwest` onto a provider error.
///
/// The request URL is stripped before the error is stringified.
pub(crate) fn classify_send_error(
    err: reqwest::Error,
    base_url: &str,
    timeout: Duration,
) -> GenerationError {
    if err.is_connect() {
        GenerationError::Connection(base_url.to_string())
    } else if err.is_timeout() {
        GenerationError::Timeout(timeout.as_secs())
    } else {
        GenerationError::HttpClient(err.without_url().to_string())
    }
}

/// Turn a non-success status into `GenerationError::Http`, keeping the body for logs.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GenerationError::Http {
        status: status.as_u16(),
        body,
    })
}

/// Reject blank generations the same way as a missing content field.
pub(crate) fn non_empty(text: String) -> Result<String, GenerationError> {
    if text.trim().is_empty() {
        Err(GenerationError::EmptyContent)
    } else {
        Ok(text)
    }
}

/// Scripted generator for testing: replays queued outcomes and counts calls.
///
/// Once the script is exhausted it keeps returning the last outcome.
pub struct MockGenerator {
    name: String,
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    last: Mutex<Result<String, GenerationError>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn succeeding(name: &str, text: &str) -> Self {
        Self::scripted(name, vec![Ok(text.to_string())])
    }

    pub fn failing(name: &str) -> Self {
        Self::scripted(
            name,
            vec![Err(GenerationError::Http {
                status: 503,
                body: format!("{name} overloaded"),
            })],
        )
    }

    pub fn scripted(name: &str, outcomes: Vec<Result<String, GenerationError>>) -> Self {
        let last = outcomes
            .last()
            .cloned()
            .unwrap_or(Err(GenerationError::EmptyContent));
        Self {
            name: name.to_string(),
            script: Mutex::new(outcomes.into()),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match next {
            Some(outcome) => {
                if let Ok(mut last) = self.last.lock() {
                    *last = outcome.clone();
                }
                outcome
            }
            None => self
                .last
                .lock()
                .map(|l| l.clone())
                .unwrap_or(Err(GenerationError::EmptyContent)),
        }
    }
}
