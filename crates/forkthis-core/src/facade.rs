// SPDX-License-Identifier: Apache-2.0

//! Platform-agnostic entry point wiring configuration, credentials and
//! storage into the feed, summarizer and leaderboard.
//!
//! The CLI and the HTTP server each supply a [`TokenProvider`] and a
//! [`WorkflowStore`] and then talk to [`ForkThis`] only.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::Result;
use crate::ai::{IssueSummarizer, ProviderKind, Summarizer, SummaryResult};
use crate::auth::TokenProvider;
use crate::config::AppConfig;
use crate::feed::IssueFeed;
use crate::github::issues::IssueFetcher;
use crate::leaderboard;
use crate::store::{HistoryKind, WorkflowStore};
use crate::types::{Issue, LeaderboardEntry};

/// Which credentials are present, without revealing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    /// Number of pooled GitHub tokens.
    pub github_tokens: usize,
    /// Providers with an API key, in registry order.
    pub ai_providers: Vec<ProviderKind>,
}

impl CredentialStatus {
    /// Inspects a token provider.
    #[must_use]
    pub fn from_provider(tokens: &dyn TokenProvider) -> Self {
        Self {
            github_tokens: tokens.github_tokens().len(),
            ai_providers: ProviderKind::ALL
                .into_iter()
                .filter(|kind| tokens.ai_key(*kind).is_some())
                .collect(),
        }
    }
}

/// Application context shared by the CLI and the server.
pub struct ForkThis {
    config: AppConfig,
    fetcher: Arc<IssueFetcher>,
    summarizer: Arc<dyn IssueSummarizer>,
    store: WorkflowStore,
    feed: IssueFeed,
    credentials: CredentialStatus,
}

impl ForkThis {
    /// Builds the production context: octocrab fetcher and HTTP summarizer.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Config` when the AI chain is misconfigured or the
    /// HTTP client cannot be built.
    pub fn new(
        config: AppConfig,
        tokens: Arc<dyn TokenProvider>,
        store: WorkflowStore,
    ) -> Result<Self> {
        let fetcher = Arc::new(IssueFetcher::from_config(&config.github, tokens.as_ref()));
        let summarizer: Arc<dyn IssueSummarizer> =
            Arc::new(Summarizer::new(&config.ai, Arc::clone(&tokens))?);
        let credentials = CredentialStatus::from_provider(tokens.as_ref());
        Ok(Self::from_parts(config, fetcher, summarizer, store, credentials))
    }

    /// Builds a context from already constructed parts.
    #[must_use]
    pub fn from_parts(
        config: AppConfig,
        fetcher: Arc<IssueFetcher>,
        summarizer: Arc<dyn IssueSummarizer>,
        store: WorkflowStore,
        credentials: CredentialStatus,
    ) -> Self {
        let feed = IssueFeed::new(
            Arc::clone(&fetcher),
            Some(Arc::clone(&summarizer)),
            store.clone(),
            &config.feed,
        );
        Self {
            config,
            fetcher,
            summarizer,
            store,
            feed,
            credentials,
        }
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The issue feed.
    #[must_use]
    pub fn feed(&self) -> &IssueFeed {
        &self.feed
    }

    /// The workflow store.
    #[must_use]
    pub fn store(&self) -> &WorkflowStore {
        &self.store
    }

    /// Credential presence.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStatus {
        &self.credentials
    }

    /// Fetches the first page of issues without touching feed state.
    ///
    /// # Errors
    ///
    /// See [`IssueFetcher::fetch_issues`].
    pub async fn fetch_issues(&self, repo: &str) -> Result<Vec<Issue>> {
        self.fetcher.fetch_issues(repo, 1).await
    }

    /// Summarizes one issue body through the fallback chain.
    ///
    /// # Errors
    ///
    /// Returns `AllProvidersFailed` when no link produced a reply.
    pub async fn summarize(&self, body: &str) -> Result<SummaryResult> {
        self.summarizer.summarize(body).await
    }

    /// Computes the leaderboard and logs it to history.
    ///
    /// `all_pages` overrides `leaderboard.all_pages` from configuration.
    ///
    /// # Errors
    ///
    /// Propagates fetch and storage errors.
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn leaderboard(
        &self,
        repo: &str,
        all_pages: Option<bool>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let all_pages = all_pages.unwrap_or(self.config.leaderboard.all_pages);
        let entries = leaderboard::leaderboard(&self.fetcher, repo, all_pages).await?;
        self.store.log(
            HistoryKind::Leaderboard,
            format!("Generated leaderboard for repo {}", repo.trim()),
        )?;
        Ok(entries)
    }
}
