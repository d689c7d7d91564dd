// SPDX-License-Identifier: Apache-2.0

//! Issue search and filtered feed views.

use anyhow::{Result, bail};
use forkthis_core::{FeedFilters, ForkError, ForkThis, SearchOutcome, WorkflowStore};
use tracing::debug;

use super::types::SearchResult;

/// Uses the given repository, falling back to the last searched one.
pub fn resolve_repo(store: &WorkflowStore, repo: Option<String>) -> Result<String> {
    if let Some(repo) = repo.filter(|r| !r.trim().is_empty()) {
        return Ok(repo);
    }
    Ok(store.last_repo()?.ok_or(ForkError::MissingRepository)?)
}

/// Searches a repository and reveals `more` additional pages.
pub async fn run(
    app: &ForkThis,
    repo: &str,
    summaries: bool,
    more: usize,
    filters: &FeedFilters,
) -> Result<SearchResult> {
    match app.feed().search(repo, summaries).await? {
        SearchOutcome::Committed { total } => debug!(total, "Search committed"),
        SearchOutcome::Superseded => bail!("Search of {repo} was superseded by a newer search"),
    }

    for _ in 0..more {
        if app.feed().load_more()? == 0 {
            break;
        }
    }
    view(app, filters, None)
}

/// Builds the filtered view of the committed search.
pub fn view(app: &ForkThis, filters: &FeedFilters, project: Option<String>) -> Result<SearchResult> {
    let state = app.feed().state()?;
    let repo = state.repo.clone().unwrap_or_default();
    let bookmarks = app.store().bookmarks(&repo)?;
    let issues = app.feed().view(filters, &bookmarks)?;

    Ok(SearchResult {
        repo,
        project,
        issues,
        revealed: state.visible_issues().len(),
        fetched: state.issues.len(),
        has_more: state.has_more(),
        labels: app.feed().labels()?,
        bookmarks,
        banner: state.error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_repo_wins() {
        let store = WorkflowStore::in_memory();
        store.set_last_repo("octo/old").unwrap();
        let repo = resolve_repo(&store, Some("octo/new".to_string())).unwrap();
        assert_eq!(repo, "octo/new");
    }

    #[test]
    fn falls_back_to_last_repo() {
        let store = WorkflowStore::in_memory();
        store.set_last_repo("octo/old").unwrap();
        assert_eq!(resolve_repo(&store, None).unwrap(), "octo/old");
        assert_eq!(resolve_repo(&store, Some("  ".to_string())).unwrap(), "octo/old");
    }

    #[test]
    fn no_repo_at_all_is_missing_repository() {
        let err = resolve_repo(&WorkflowStore::in_memory(), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForkError>(),
            Some(ForkError::MissingRepository)
        ));
    }
}
