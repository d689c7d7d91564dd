// SPDX-License-Identifier: Apache-2.0

//! AI provider adapter trait and shared HTTP helpers.
//!
//! Each provider is reached through a [`ProviderAdapter`]. Adapters are
//! stateless apart from their HTTP client: the model and credential come
//! from the chain link being tried.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::SecretString;
use tracing::warn;

use super::registry::ProviderKind;
use super::types::SummaryPrompt;
use crate::error::ForkError;

/// A single AI provider endpoint.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Sends the prompt and returns the raw reply text.
    ///
    /// Provider failures are returned as [`ForkError::AI`] wrapped in
    /// `anyhow`, so callers can inspect the status code.
    async fn complete(
        &self,
        model: &str,
        prompt: &SummaryPrompt,
        api_key: &SecretString,
    ) -> Result<String>;
}

/// Builds the HTTP client shared by all adapters.
pub fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .context("Failed to create HTTP client")
}

/// Converts a non-success response into a provider error.
///
/// The body is kept in the message so `insufficient_quota` markers survive.
pub(crate) async fn provider_error(kind: ProviderKind, response: Response) -> anyhow::Error {
    let status = response.status().as_u16();
    if status == 429 {
        warn!(provider = %kind, "Rate limited by provider");
    }
    let body = response.text().await.unwrap_or_default();
    ForkError::AI {
        message: format!("{} API error (HTTP {status}): {body}", kind.config().display_name),
        status: Some(status),
        provider: kind.name().to_string(),
    }
    .into()
}

/// Error for a successful response that carried no usable text.
pub(crate) fn empty_reply(kind: ProviderKind) -> anyhow::Error {
    ForkError::AI {
        message: format!("{} returned an empty reply", kind.config().display_name),
        status: None,
        provider: kind.name().to_string(),
    }
    .into()
}

/// Whether an adapter failure means the provider's quota is exhausted.
#[must_use]
pub fn is_quota_error(err: &anyhow::Error) -> bool {
    if let Some(fork_err) = err.downcast_ref::<ForkError>() {
        return fork_err.is_quota_exhausted();
    }
    err.to_string().contains("insufficient_quota")
}
