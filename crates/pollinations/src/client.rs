//! HTTP client for the completion endpoint.

use std::time::Duration;

use rand::Rng;

use crate::cleanup::scrub_reply;
use crate::messages::{build_messages, CompletionRequest, CompletionResponse, PromptAction};

/// Default endpoint URL.
pub const DEFAULT_API_URL: &str = "https://text.pollinations.ai/openai";

/// Completion model requested for every rewrite.
const MODEL: &str = "openai-large";

/// Referrer tag sent with every request.
const REFERRER: &str = "AtelierImageStudio";

/// Exclusive upper bound of the per-call seed range.
const SEED_SPAN: u64 = 100_000_000;

/// HTTP request timeout for a single completion.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the completion API layer.
#[derive(Debug, thiserror::Error)]
pub enum PollinationsError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Text API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body was not a completion object.
    #[error("Unexpected completion response: {0}")]
    UnexpectedResponse(String),

    /// A well-formed response with no usable completion text.
    #[error("Completion response contained no content")]
    MissingContent,
}

/// HTTP client for prompt rewriting.
pub struct PollinationsClient {
    client: reqwest::Client,
    api_url: String,
}

impl PollinationsClient {
    /// Create a client against the default endpoint.
    pub fn new() -> Self {
        Self::with_url(DEFAULT_API_URL.to_string())
    }

    /// Create a client against a custom endpoint URL (tests, proxies).
    pub fn with_url(api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, api_url }
    }

    /// Rewrite `text` according to `action`, returning the scrubbed reply.
    ///
    /// Each call carries a fresh uniform seed so the provider cannot serve
    /// a cached completion for a repeated prompt.
    pub async fn rewrite(
        &self,
        text: &str,
        action: PromptAction,
    ) -> Result<String, PollinationsError> {
        let payload = CompletionRequest {
            model: MODEL,
            messages: build_messages(action, text),
            private: true,
            seed: rand::rng().random_range(0..SEED_SPAN),
            referrer: REFERRER,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PollinationsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| PollinationsError::UnexpectedResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(PollinationsError::MissingContent)?;

        tracing::debug!(?action, chars = content.len(), "Prompt rewrite completed");

        Ok(scrub_reply(&content))
    }
}

impl Default for PollinationsClient {
    fn default() -> Self {
        Self::new()
    }
}
