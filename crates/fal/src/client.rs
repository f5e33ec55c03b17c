//! HTTP client for the synchronous generation endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use atelier_core::params::ApiImage;

/// Default base URL of the synchronous run endpoint.
pub const DEFAULT_BASE_URL: &str = "https://fal.run";

/// Response header carrying the provider-assigned request id.
const REQUEST_ID_HEADER: &str = "x-fal-request-id";

/// Output payload of a completed generation.
///
/// Only `images` is load-bearing; the rest of the provider's output
/// (seed, timings, nsfw flags, model-specific fields) rides along in
/// `extra` and is passed back to callers untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutput {
    #[serde(default)]
    pub images: Vec<ApiImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A completed run: the parsed output plus the provider's request id
/// (taken from the `x-fal-request-id` response header when present).
#[derive(Debug, Clone)]
pub struct RunResult {
    pub output: GenerationOutput,
    pub request_id: Option<String>,
}

/// Errors from the generation API layer.
#[derive(Debug, thiserror::Error)]
pub enum FalError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body did not parse as a generation output.
    #[error("Unexpected generation response: {0}")]
    UnexpectedResponse(String),
}

/// HTTP client for the synchronous generation endpoint.
pub struct FalClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FalClient {
    /// Create a client against the default endpoint.
    ///
    /// No request timeout is configured: a generation is a single
    /// blocking call whose duration the provider controls.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (tests, proxies).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Run one generation: `POST {base_url}/{model_id}` with the caller's
    /// input forwarded verbatim, blocking until the provider answers.
    pub async fn run(&self, model_id: &str, input: &Value) -> Result<RunResult, FalError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, model_id))
            .header("Authorization", format!("Key {}", self.api_key))
            .json(input)
            .send()
            .await?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FalError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let output: GenerationOutput = serde_json::from_str(&body)
            .map_err(|e| FalError::UnexpectedResponse(e.to_string()))?;

        tracing::debug!(
            model_id,
            request_id = request_id.as_deref().unwrap_or("-"),
            images = output.images.len(),
            "Generation run completed"
        );

        Ok(RunResult { output, request_id })
    }
}
