// SPDX-License-Identifier: Apache-2.0

//! Issue feed orchestration.
//!
//! A search fetches issues, optionally summarizes them concurrently and
//! commits the result to shared state. Each search takes a fresh fetch id;
//! a search whose id is no longer the latest commits nothing, so the last
//! search started always wins.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::ai::IssueSummarizer;
use crate::config::FeedConfig;
use crate::error::ForkError;
use crate::filters::FeedFilters;
use crate::github::issues::IssueFetcher;
use crate::github::parse_owner_repo;
use crate::store::{HistoryKind, ProjectSnapshot, WorkflowStore};
use crate::types::{Difficulty, Issue};

/// Banner shown when a search cannot fetch issues.
pub const FETCH_FAILED_BANNER: &str = "Failed to fetch issues. Check repo name.";

/// Banner shown when summaries fail because a provider ran out of quota.
pub const QUOTA_BANNER: &str =
    "AI summary failed due to insufficient quota. Please check your provider plan and billing details.";

/// Summary attached to an issue whose summarization failed.
pub const DEGRADED_SUMMARY: &str = "Couldn't summarize issue.";

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were committed; `total` issues were fetched.
    Committed {
        /// Number of issues fetched.
        total: usize,
    },
    /// A newer search started first; nothing was committed.
    Superseded,
}

/// Copy of the feed state for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    /// Repository of the current search.
    pub repo: Option<String>,
    /// Every fetched issue, in fetch order.
    pub issues: Vec<Issue>,
    /// Length of the exposed prefix.
    pub visible: usize,
    /// Error banner, if any.
    pub error: Option<String>,
    /// True while a search is in flight.
    pub loading: bool,
}

impl FeedState {
    /// The exposed prefix of the fetched issues.
    #[must_use]
    pub fn visible_issues(&self) -> &[Issue] {
        &self.issues[..self.visible.min(self.issues.len())]
    }

    /// Whether `load_more` would reveal anything.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible < self.issues.len()
    }
}

/// Coordinates searches, summaries and incremental reveal.
pub struct IssueFeed {
    fetcher: Arc<IssueFetcher>,
    summarizer: Option<Arc<dyn IssueSummarizer>>,
    store: WorkflowStore,
    fetch_id: AtomicU64,
    state: Mutex<FeedState>,
    page_size: usize,
    fetch_all_pages: bool,
}

impl IssueFeed {
    /// Creates a feed. Without a summarizer, summary requests degrade every
    /// issue.
    #[must_use]
    pub fn new(
        fetcher: Arc<IssueFetcher>,
        summarizer: Option<Arc<dyn IssueSummarizer>>,
        store: WorkflowStore,
        config: &FeedConfig,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            store,
            fetch_id: AtomicU64::new(0),
            state: Mutex::new(FeedState::default()),
            page_size: config.page_size.max(1),
            fetch_all_pages: config.fetch_all_pages,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, FeedState>> {
        self.state.lock().map_err(|_| ForkError::Storage {
            message: "feed state lock poisoned".to_string(),
        })
    }

    fn is_current(&self, id: u64) -> bool {
        self.fetch_id.load(Ordering::SeqCst) == id
    }

    /// Searches a repository.
    ///
    /// Returns `Superseded` when another search started before this one
    /// finished; in that case shared state is left to the newer search.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when the search is still current and issues
    /// could not be fetched. The state then carries [`FETCH_FAILED_BANNER`].
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn search(&self, repo: &str, with_summaries: bool) -> Result<SearchOutcome> {
        let id = self.fetch_id.fetch_add(1, Ordering::SeqCst) + 1;
        let repo = repo.trim().to_string();
        let valid = parse_owner_repo(&repo);

        {
            let mut state = self.lock()?;
            *state = FeedState {
                repo: Some(repo.clone()),
                loading: valid.is_ok(),
                error: valid.is_err().then(|| FETCH_FAILED_BANNER.to_string()),
                ..FeedState::default()
            };
        }

        // A rejected repo never becomes the last searched one.
        if let Err(err) = valid {
            warn!(error = %err, "Search rejected");
            self.store
                .log(HistoryKind::Search, format!("Searched repo {repo}"))?;
            return Err(err);
        }
        if let Err(err) = self.store.set_last_repo(&repo) {
            self.abandon(id)?;
            return Err(err);
        }

        let fetched = if self.fetch_all_pages {
            self.fetcher.fetch_all_issues(&repo).await
        } else {
            self.fetcher.fetch_issues(&repo, 1).await
        };

        let outcome = match fetched {
            Ok(mut issues) => {
                let quota_hit = if with_summaries {
                    self.attach_summaries(&mut issues).await
                } else {
                    false
                };

                let mut state = self.lock()?;
                if self.is_current(id) {
                    let total = issues.len();
                    state.visible = self.page_size.min(total);
                    state.issues = issues;
                    state.loading = false;
                    if quota_hit {
                        state.error = Some(QUOTA_BANNER.to_string());
                    }
                    info!(total, "Search committed");
                    Ok(SearchOutcome::Committed { total })
                } else {
                    debug!(id, "Search superseded, discarding results");
                    Ok(SearchOutcome::Superseded)
                }
            }
            Err(err) => {
                let mut state = self.lock()?;
                if self.is_current(id) {
                    warn!(error = %err, "Search failed");
                    state.error = Some(FETCH_FAILED_BANNER.to_string());
                    state.loading = false;
                    Err(err)
                } else {
                    debug!(id, "Superseded search failed, ignoring");
                    Ok(SearchOutcome::Superseded)
                }
            }
        };

        self.store
            .log(HistoryKind::Search, format!("Searched repo {repo}"))?;
        outcome
    }

    /// Clears the loading flag of search `id` if it is still current.
    fn abandon(&self, id: u64) -> Result<()> {
        let mut state = self.lock()?;
        if self.is_current(id) {
            state.loading = false;
        }
        Ok(())
    }

    /// Summarizes every issue concurrently. Returns true when any failure was
    /// a quota exhaustion.
    async fn attach_summaries(&self, issues: &mut [Issue]) -> bool {
        let Some(summarizer) = self.summarizer.as_ref() else {
            for issue in issues.iter_mut() {
                degrade(issue);
            }
            return false;
        };

        let results = join_all(issues.iter().map(|issue| summarizer.summarize(&issue.body))).await;

        let mut quota_hit = false;
        for (issue, result) in issues.iter_mut().zip(results) {
            match result {
                Ok(reply) => {
                    issue.summary = Some(reply.summary);
                    issue.difficulty = reply.difficulty;
                }
                Err(err) => {
                    quota_hit |= err.is_quota_exhausted();
                    debug!(number = issue.number, error = %err, "Summary degraded");
                    degrade(issue);
                }
            }
        }
        quota_hit
    }

    /// Extends the exposed prefix by one page without refetching.
    ///
    /// Returns the number of newly exposed issues.
    ///
    /// # Errors
    ///
    /// Fails only if the state lock is poisoned.
    pub fn load_more(&self) -> Result<usize> {
        let mut state = self.lock()?;
        let before = state.visible;
        state.visible = (before + self.page_size).min(state.issues.len());
        Ok(state.visible - before)
    }

    /// Snapshot of the current state.
    ///
    /// # Errors
    ///
    /// Fails only if the state lock is poisoned.
    pub fn state(&self) -> Result<FeedState> {
        Ok(self.lock()?.clone())
    }

    /// Exposed issues after applying filters and sort.
    ///
    /// # Errors
    ///
    /// Fails only if the state lock is poisoned.
    pub fn view(&self, filters: &FeedFilters, bookmarks: &BTreeSet<u64>) -> Result<Vec<Issue>> {
        let state = self.lock()?;
        Ok(filters.apply(state.visible_issues(), bookmarks))
    }

    /// Distinct label names among the exposed issues, sorted.
    ///
    /// # Errors
    ///
    /// Fails only if the state lock is poisoned.
    pub fn labels(&self) -> Result<Vec<String>> {
        let state = self.lock()?;
        let labels: BTreeSet<&str> = state
            .visible_issues()
            .iter()
            .flat_map(Issue::label_names)
            .collect();
        Ok(labels.into_iter().map(str::to_string).collect())
    }

    /// Loads a project, makes it active and searches its repository.
    ///
    /// The snapshot is returned so the caller can reapply its filters.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` when the project does not exist
    /// - any error from [`IssueFeed::search`]
    pub async fn restore_project(&self, name: &str) -> Result<(ProjectSnapshot, SearchOutcome)> {
        let snapshot = self.store.activate_project(name)?;
        let outcome = self.search(&snapshot.repo, snapshot.ai_summary).await?;
        Ok((snapshot, outcome))
    }
}

fn degrade(issue: &mut Issue) {
    issue.summary = Some(DEGRADED_SUMMARY.to_string());
    issue.difficulty = Difficulty::Unknown;
}
