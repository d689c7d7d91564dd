// SPDX-License-Identifier: Apache-2.0

//! OpenAI-compatible `chat/completions` adapter.
//!
//! Serves `OpenAI`, Groq and `OpenRouter`; the latter additionally receives
//! attribution headers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::provider::{ProviderAdapter, empty_reply, provider_error};
use super::registry::ProviderKind;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SummaryPrompt};

/// Referer sent to `OpenRouter` for app attribution.
pub const OPENROUTER_REFERER: &str = "https://forkthis.app";

/// Title sent to `OpenRouter` for app attribution.
pub const OPENROUTER_TITLE: &str = "ForkThis";

/// Adapter for providers speaking the `chat/completions` wire format.
pub struct ChatCompletionsAdapter {
    kind: ProviderKind,
    http: Client,
    url: String,
}

impl ChatCompletionsAdapter {
    /// Creates an adapter targeting the provider's registry endpoint.
    #[must_use]
    pub fn new(kind: ProviderKind, http: Client) -> Self {
        Self {
            kind,
            http,
            url: kind.config().api_url.to_string(),
        }
    }

    /// Overrides the endpoint URL (proxies, local test servers).
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builds the request body for a model and prompt.
    #[must_use]
    pub fn build_request(model: &str, prompt: &SummaryPrompt) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
        }
    }

    /// Provider-specific headers added to every request.
    #[must_use]
    pub fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.kind == ProviderKind::OpenRouter {
            headers.insert("HTTP-Referer", HeaderValue::from_static(OPENROUTER_REFERER));
            headers.insert("X-Title", HeaderValue::from_static(OPENROUTER_TITLE));
        }
        headers
    }
}

#[async_trait]
impl ProviderAdapter for ChatCompletionsAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    #[instrument(skip(self, prompt, api_key), fields(provider = %self.kind))]
    async fn complete(
        &self,
        model: &str,
        prompt: &SummaryPrompt,
        api_key: &SecretString,
    ) -> Result<String> {
        debug!(model, "Calling chat completions endpoint");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key.expose_secret())
            .headers(self.build_headers())
            .json(&Self::build_request(model, prompt))
            .send()
            .await
            .with_context(|| format!("Failed to send request to {} API", self.kind))?;

        if !response.status().is_success() {
            return Err(provider_error(self.kind, response).await);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} API response", self.kind))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| empty_reply(self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForkError;
    use axum::Router;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::post;
    use tokio::net::TcpListener;

    fn prompt() -> SummaryPrompt {
        SummaryPrompt {
            system: "sys".to_string(),
            user: "usr".to_string(),
        }
    }

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    #[test]
    fn request_has_system_then_user() {
        let req = ChatCompletionsAdapter::build_request("gpt-4o-mini", &prompt());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
    }

    #[test]
    fn openrouter_gets_attribution_headers() {
        let http = Client::new();
        let router = ChatCompletionsAdapter::new(ProviderKind::OpenRouter, http.clone());
        let headers = router.build_headers();
        assert_eq!(headers["HTTP-Referer"], OPENROUTER_REFERER);
        assert_eq!(headers["X-Title"], OPENROUTER_TITLE);

        let groq = ChatCompletionsAdapter::new(ProviderKind::Groq, http);
        assert!(groq.build_headers().is_empty());
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: AxumHeaders| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                axum::Json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": format!("Easy fix ({auth})")}}]
                }))
            }),
        );
        let url = serve(app).await;

        let adapter =
            ChatCompletionsAdapter::new(ProviderKind::OpenAi, Client::new()).with_url(url);
        let reply = adapter
            .complete("gpt-4o-mini", &prompt(), &SecretString::from("sk-test".to_string()))
            .await
            .unwrap();
        assert_eq!(reply, "Easy fix (Bearer sk-test)");
    }

    #[tokio::test]
    async fn rate_limit_surfaces_status() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let url = serve(app).await;

        let adapter = ChatCompletionsAdapter::new(ProviderKind::Groq, Client::new()).with_url(url);
        let err = adapter
            .complete("llama3-8b-8192", &prompt(), &SecretString::from("k".to_string()))
            .await
            .unwrap_err();

        match err.downcast_ref::<ForkError>() {
            Some(ForkError::AI { status, provider, .. }) => {
                assert_eq!(*status, Some(429));
                assert_eq!(provider, "groq");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
