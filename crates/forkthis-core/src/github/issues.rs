// SPDX-License-Identifier: Apache-2.0

//! Issue listing with credential rotation and full-repository pagination.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::credentials::CredentialPool;
use super::parse_owner_repo;
use crate::Result;
use crate::auth::TokenProvider;
use crate::config::GitHubConfig;
use crate::error::ForkError;
use crate::retry::{is_retryable_transport, retry_backoff};
use crate::types::{Difficulty, Issue, IssueAuthor, IssueLabel, IssueState};

/// Author object as returned by the REST API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawUser {
    /// Login.
    pub login: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: String,
}

/// Label object as returned by the REST API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawLabel {
    /// Label name.
    pub name: String,
    /// Hex color.
    #[serde(default)]
    pub color: String,
}

/// One entry of `GET /repos/{owner}/{repo}/issues`.
///
/// Pull requests come back from the same endpoint and carry a
/// `pull_request` object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawIssue {
    /// Issue number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body, `null` when empty.
    #[serde(default)]
    pub body: Option<String>,
    /// Author, `null` for deleted accounts.
    #[serde(default)]
    pub user: Option<RawUser>,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    /// State.
    #[serde(default)]
    pub state: IssueState,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Browser URL.
    pub html_url: String,
    /// Present only on pull requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    /// True when this entry is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Converts to the feed representation.
    #[must_use]
    pub fn into_issue(self, repository: &str) -> Issue {
        Issue {
            repository: repository.to_string(),
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            author: self.user.map(|u| IssueAuthor {
                login: u.login,
                avatar_url: u.avatar_url,
            }),
            labels: self
                .labels
                .into_iter()
                .map(|l| IssueLabel {
                    name: l.name,
                    color: l.color,
                })
                .collect(),
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
            html_url: self.html_url,
            summary: None,
            difficulty: Difficulty::Unknown,
        }
    }
}

/// Why a single page request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// GitHub answered with this non-success status.
    Status(u16),
    /// No usable response (connection failure, undecodable body).
    Transport(String),
}

/// Raw access to the issues endpoint with one credential.
#[async_trait]
pub trait IssuesApi: Send + Sync {
    /// Lists one page of open issues (pull requests included).
    async fn list_page(
        &self,
        token: &SecretString,
        owner: &str,
        name: &str,
        page: u32,
        per_page: u8,
    ) -> std::result::Result<Vec<RawIssue>, PageError>;
}

#[derive(Serialize)]
struct ListParams {
    state: &'static str,
    per_page: u8,
    page: u32,
}

/// Values built once per credential and reused afterwards.
struct PerToken<T> {
    entries: Mutex<HashMap<String, T>>,
}

impl<T> Default for PerToken<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone> PerToken<T> {
    fn get_or_try_insert<E>(
        &self,
        token: &SecretString,
        build: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = entries.get(token.expose_secret()) {
            return Ok(value.clone());
        }
        let value = build()?;
        entries.insert(token.expose_secret().to_string(), value.clone());
        Ok(value)
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// [`IssuesApi`] backed by octocrab, with one client per token.
#[derive(Default)]
pub struct OctocrabIssuesApi {
    base_uri: Option<String>,
    timeout: Option<Duration>,
    clients: PerToken<Octocrab>,
}

impl fmt::Debug for OctocrabIssuesApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OctocrabIssuesApi")
            .field("base_uri", &self.base_uri)
            .field("timeout", &self.timeout)
            .field("clients", &self.clients.len())
            .finish()
    }
}

impl OctocrabIssuesApi {
    /// Creates the API from GitHub settings.
    #[must_use]
    pub fn from_config(config: &GitHubConfig) -> Self {
        Self {
            base_uri: config.api_base_url.clone(),
            timeout: Some(Duration::from_secs(config.api_timeout_seconds)),
            clients: PerToken::default(),
        }
    }

    fn client(&self, token: &SecretString) -> std::result::Result<Octocrab, PageError> {
        self.clients
            .get_or_try_insert(token, || self.build_client(token))
    }

    fn build_client(&self, token: &SecretString) -> std::result::Result<Octocrab, PageError> {
        debug!("Building GitHub client");
        let mut builder = Octocrab::builder()
            .personal_token(token.expose_secret().to_string())
            .set_connect_timeout(self.timeout)
            .set_read_timeout(self.timeout);
        if let Some(base) = &self.base_uri {
            builder = builder
                .base_uri(base.as_str())
                .map_err(|e| PageError::Transport(format!("Invalid GitHub base URL: {e}")))?;
        }
        builder
            .build()
            .map_err(|e| PageError::Transport(format!("Failed to build GitHub client: {e}")))
    }
}

#[async_trait]
impl IssuesApi for OctocrabIssuesApi {
    #[instrument(skip(self, token), fields(owner = %owner, name = %name, page = page))]
    async fn list_page(
        &self,
        token: &SecretString,
        owner: &str,
        name: &str,
        page: u32,
        per_page: u8,
    ) -> std::result::Result<Vec<RawIssue>, PageError> {
        let client = self.client(token)?;
        let route = format!("/repos/{owner}/{name}/issues");
        let params = ListParams {
            state: "open",
            per_page,
            page,
        };

        (|| async {
            client
                .get::<Vec<RawIssue>, _, _>(&route, Some(&params))
                .await
        })
        .retry(retry_backoff())
        .when(is_retryable_transport)
        .notify(|err, dur| {
            warn!(error = %err, retry_after = ?dur, "Retrying issue page fetch");
        })
        .await
        .map_err(|e| match e {
            octocrab::Error::GitHub { source, .. } => PageError::Status(source.status_code.as_u16()),
            other => PageError::Transport(other.to_string()),
        })
    }
}

/// Fetches issues for a repository, rotating through pooled credentials.
pub struct IssueFetcher {
    api: Arc<dyn IssuesApi>,
    pool: CredentialPool,
    per_page: u8,
}

impl IssueFetcher {
    /// Creates a fetcher over an explicit API and pool.
    #[must_use]
    pub fn new(api: Arc<dyn IssuesApi>, pool: CredentialPool, per_page: u8) -> Self {
        Self {
            api,
            pool,
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Creates an octocrab-backed fetcher from configuration and credentials.
    #[must_use]
    pub fn from_config(config: &GitHubConfig, tokens: &dyn TokenProvider) -> Self {
        Self::new(
            Arc::new(OctocrabIssuesApi::from_config(config)),
            CredentialPool::from_provider(tokens),
            config.per_page,
        )
    }

    /// Fetches one raw page, trying each credential at most once.
    async fn fetch_raw_page(&self, owner: &str, name: &str, page: u32) -> Result<Vec<RawIssue>> {
        let attempts = self.pool.len();
        for _ in 0..attempts {
            let Some((index, token)) = self.pool.rotate() else {
                break;
            };
            match self
                .api
                .list_page(&token, owner, name, page, self.per_page)
                .await
            {
                Ok(raw) => return Ok(raw),
                Err(PageError::Status(status @ (401 | 403))) => {
                    warn!(token_index = index, status, "GitHub token rejected, trying next");
                }
                Err(PageError::Status(status)) => {
                    return Err(ForkError::Upstream { status });
                }
                Err(PageError::Transport(message)) => {
                    return Err(ForkError::GitHub { message });
                }
            }
        }
        Err(ForkError::CredentialsExhausted { attempts })
    }

    /// Fetches one page of open issues, pull requests excluded.
    ///
    /// # Errors
    ///
    /// - `InvalidRepoFormat` when `repo` is not `owner/name`
    /// - `CredentialsExhausted` when every token is rejected (or none exist)
    /// - `Upstream` for any other non-success status
    #[instrument(skip(self), fields(repo = %repo, page = page))]
    pub async fn fetch_issues(&self, repo: &str, page: u32) -> Result<Vec<Issue>> {
        let (owner, name) = parse_owner_repo(repo)?;
        let repository = format!("{owner}/{name}");
        let raw = self.fetch_raw_page(&owner, &name, page.max(1)).await?;
        let issues = into_issues(raw, &repository);
        debug!(count = issues.len(), "Fetched issue page");
        Ok(issues)
    }

    /// Fetches every page of open issues in GitHub order.
    ///
    /// Stops at the first page holding fewer raw entries than the page size.
    /// Pull requests count toward that size, so a page thinned by filtering
    /// does not end pagination early.
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn fetch_all_issues(&self, repo: &str) -> Result<Vec<Issue>> {
        let (owner, name) = parse_owner_repo(repo)?;
        let repository = format!("{owner}/{name}");
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let raw = self.fetch_raw_page(&owner, &name, page).await?;
            let raw_len = raw.len();
            all.extend(into_issues(raw, &repository));
            if raw_len < usize::from(self.per_page) {
                break;
            }
            page += 1;
        }

        debug!(count = all.len(), pages = page, "Fetched all issue pages");
        Ok(all)
    }
}

fn into_issues(raw: Vec<RawIssue>, repository: &str) -> Vec<Issue> {
    raw.into_iter()
        .filter(|r| !r.is_pull_request())
        .map(|r| r.into_issue(repository))
        .collect()
}
