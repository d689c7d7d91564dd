// SPDX-License-Identifier: Apache-2.0

//! Summarizer fallback chain.
//!
//! Links are tried in a fixed priority order. A link whose provider has no
//! credential, or whose breaker is open, is skipped. A failing link is logged
//! and the next one is tried. The first reply wins, so each request makes at
//! most one successful provider call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::chat::ChatCompletionsAdapter;
use super::circuit_breaker::BreakerSet;
use super::gemini::GeminiAdapter;
use super::prompt::{build_prompt, parse_reply};
use super::provider::{ProviderAdapter, build_http_client, is_quota_error};
use super::registry::{ProviderKind, WireFormat};
use super::types::SummaryResult;
use crate::Result;
use crate::auth::TokenProvider;
use crate::config::AiConfig;
use crate::error::ForkError;

/// One (model, provider) entry of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainLink {
    /// Provider serving the model.
    pub provider: ProviderKind,
    /// Model identifier.
    pub model: String,
}

impl ChainLink {
    /// Creates a link.
    #[must_use]
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

/// Built-in chain, cheapest and fastest first.
pub const DEFAULT_CHAIN: &[(ProviderKind, &str)] = &[
    (ProviderKind::Groq, "llama3-8b-8192"),
    (ProviderKind::Groq, "mixtral-8x7b-32768"),
    (ProviderKind::Gemini, "gemini-2.0-flash"),
    (ProviderKind::OpenAi, "gpt-4o-mini"),
    (ProviderKind::OpenAi, "gpt-3.5-turbo"),
    (ProviderKind::OpenRouter, "gpt-3.5-turbo"),
];

/// The built-in chain as owned links.
#[must_use]
pub fn default_chain() -> Vec<ChainLink> {
    DEFAULT_CHAIN
        .iter()
        .map(|(provider, model)| ChainLink::new(*provider, *model))
        .collect()
}

/// Resolves the chain from configuration, falling back to [`DEFAULT_CHAIN`].
///
/// # Errors
///
/// Returns `ForkError::Config` when a configured link names an unknown provider.
pub fn chain_from_config(config: &AiConfig) -> Result<Vec<ChainLink>> {
    if config.chain.is_empty() {
        return Ok(default_chain());
    }
    config
        .chain
        .iter()
        .map(|link| {
            let provider = link
                .provider
                .parse::<ProviderKind>()
                .map_err(|message| ForkError::Config { message })?;
            Ok(ChainLink::new(provider, link.model.clone()))
        })
        .collect()
}

/// Anything that can turn an issue body into a summary.
///
/// The feed depends on this trait so tests can substitute a scripted summarizer.
#[async_trait]
pub trait IssueSummarizer: Send + Sync {
    /// Summarizes one issue body.
    async fn summarize(&self, body: &str) -> Result<SummaryResult>;
}

/// Production summarizer walking the fallback chain.
pub struct Summarizer {
    links: Vec<ChainLink>,
    adapters: HashMap<ProviderKind, Arc<dyn ProviderAdapter>>,
    tokens: Arc<dyn TokenProvider>,
    breakers: BreakerSet,
    max_body_length: usize,
}

impl Summarizer {
    /// Creates a summarizer with HTTP adapters for every registered provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &AiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = build_http_client(config.timeout_seconds).map_err(|e| ForkError::Config {
            message: e.to_string(),
        })?;

        let adapters: Vec<Arc<dyn ProviderAdapter>> = ProviderKind::ALL
            .into_iter()
            .map(|kind| -> Arc<dyn ProviderAdapter> {
                match kind.config().wire {
                    WireFormat::ChatCompletions => {
                        Arc::new(ChatCompletionsAdapter::new(kind, http.clone()))
                    }
                    WireFormat::GeminiGenerate => Arc::new(GeminiAdapter::new(http.clone())),
                }
            })
            .collect();

        Ok(Self::with_adapters(
            chain_from_config(config)?,
            adapters,
            tokens,
            config,
        ))
    }

    /// Creates a summarizer from explicit links and adapters.
    #[must_use]
    pub fn with_adapters(
        links: Vec<ChainLink>,
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        tokens: Arc<dyn TokenProvider>,
        config: &AiConfig,
    ) -> Self {
        Self {
            links,
            adapters: adapters.into_iter().map(|a| (a.kind(), a)).collect(),
            tokens,
            breakers: BreakerSet::new(
                config.circuit_breaker_threshold,
                config.circuit_breaker_reset_seconds,
            ),
            max_body_length: config.max_body_length,
        }
    }
}

#[async_trait]
impl IssueSummarizer for Summarizer {
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    async fn summarize(&self, body: &str) -> Result<SummaryResult> {
        let prompt = build_prompt(body, self.max_body_length);
        let mut attempted = 0;
        let mut quota_exhausted = false;

        for link in &self.links {
            let Some(api_key) = self.tokens.ai_key(link.provider) else {
                debug!(provider = %link.provider, model = %link.model, "Skipping link without credential");
                continue;
            };
            if self.breakers.is_open(link.provider) {
                debug!(provider = %link.provider, model = %link.model, "Skipping link with open circuit");
                continue;
            }
            let Some(adapter) = self.adapters.get(&link.provider) else {
                debug!(provider = %link.provider, "No adapter registered");
                continue;
            };

            attempted += 1;
            match adapter.complete(&link.model, &prompt, &api_key).await {
                Ok(reply) => {
                    self.breakers.record_success(link.provider);
                    info!(provider = %link.provider, model = %link.model, "Summary generated");
                    return Ok(parse_reply(&reply));
                }
                Err(err) => {
                    self.breakers.record_failure(link.provider);
                    quota_exhausted |= is_quota_error(&err);
                    warn!(
                        provider = %link.provider,
                        model = %link.model,
                        error = %err,
                        "Summary link failed, trying next"
                    );
                }
            }
        }

        warn!(attempted, quota_exhausted, "All summary links failed");
        Err(ForkError::AllProvidersFailed {
            attempted,
            quota_exhausted,
        })
    }
}
