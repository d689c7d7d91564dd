// SPDX-License-Identifier: Apache-2.0

//! Google Gemini `generateContent` adapter.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::provider::{ProviderAdapter, empty_reply, provider_error};
use super::registry::ProviderKind;
use super::types::{GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, SummaryPrompt};

/// Adapter for the native Gemini API. The key travels as a `key` query parameter.
pub struct GeminiAdapter {
    http: Client,
    base_url: String,
}

impl GeminiAdapter {
    /// Creates an adapter targeting the public Gemini endpoint.
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: ProviderKind::Gemini.config().api_url.to_string(),
        }
    }

    /// Overrides the models base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Endpoint for a model, without the key.
    #[must_use]
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Gemini has no system role here, so both prompts share one text part.
    #[must_use]
    pub fn build_request(prompt: &SummaryPrompt) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: format!("{}\n\n{}", prompt.system, prompt.user),
                }],
            }],
        }
    }

    /// Pulls `candidates[0].content.parts[0].text` out of a response.
    #[must_use]
    pub fn extract_text(response: GeminiResponse) -> Option<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    #[instrument(skip(self, prompt, api_key))]
    async fn complete(
        &self,
        model: &str,
        prompt: &SummaryPrompt,
        api_key: &SecretString,
    ) -> Result<String> {
        debug!(model, "Calling Gemini generateContent");

        let response = self
            .http
            .post(self.endpoint(model))
            .query(&[("key", api_key.expose_secret())])
            .json(&Self::build_request(prompt))
            .send()
            .await
            .context("Failed to send request to gemini API")?;

        if !response.status().is_success() {
            return Err(provider_error(ProviderKind::Gemini, response).await);
        }

        let body: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse gemini API response")?;

        Self::extract_text(body).ok_or_else(|| empty_reply(ProviderKind::Gemini))
    }
}
