//! HTTP client for `generateContent`.

use crate::error::{GeminiError, Result};
use crate::types::{GeminiConfig, GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use moodtune_core::{LanguageModel, MoodError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Client for one configured model.
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let base = config.base_url.trim_end_matches('/');
        let model = config.model.trim();
        if model.is_empty() || model.contains('/') {
            return Err(GeminiError::InvalidUrl(format!("bad model name: {model:?}")));
        }

        let endpoint = Url::parse(&format!("{base}/models/{model}:generateContent"))
            .map_err(|e| GeminiError::InvalidUrl(format!("{base}: {e}")))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(GeminiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Moodtune/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
        })
    }

    /// Send `prompt` as a single user turn and return the model's text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(prompt_len = prompt.len(), "Calling generateContent");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::single(prompt))
            .send()
            .await
            .map_err(|e| GeminiError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                error!(endpoint = %self.endpoint, "Model not found; check the configured model name");
            }
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ParseError(e.without_url().to_string()))?;

        body.into_text().ok_or(GeminiError::EmptyResponse)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> moodtune_core::Result<String> {
        GeminiClient::generate(self, prompt)
            .await
            .map_err(MoodError::from)
    }
}
