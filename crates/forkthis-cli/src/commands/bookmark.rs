// SPDX-License-Identifier: Apache-2.0

//! Bookmark commands.

use anyhow::Result;
use forkthis_core::WorkflowStore;

use super::types::{BookmarkListResult, BookmarkToggleResult};

/// Flips the bookmark of one issue.
pub fn toggle(store: &WorkflowStore, repo: &str, number: u64) -> Result<BookmarkToggleResult> {
    let bookmarked = store.toggle_bookmark(repo, number)?;
    Ok(BookmarkToggleResult {
        repo: repo.trim().to_string(),
        number,
        bookmarked,
    })
}

/// Lists bookmarks, optionally for one repository.
pub fn list(store: &WorkflowStore, repo: Option<&str>) -> Result<BookmarkListResult> {
    let mut bookmarks = store.all_bookmarks()?;
    if let Some(repo) = repo {
        bookmarks.retain(|r, _| r == repo.trim());
    }
    Ok(BookmarkListResult { bookmarks })
}
