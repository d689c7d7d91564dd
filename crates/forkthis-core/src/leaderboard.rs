// SPDX-License-Identifier: Apache-2.0

//! Per-author issue counts for a repository.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::Result;
use crate::github::issues::IssueFetcher;
use crate::types::{Issue, LeaderboardEntry};

/// Tallies issues per author, most active first.
///
/// Issues without an author are ignored. Authors with equal counts keep the
/// order in which they were first seen.
#[must_use]
pub fn tally(issues: &[Issue]) -> Vec<LeaderboardEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<LeaderboardEntry> = Vec::new();

    for author in issues.iter().filter_map(|issue| issue.author.as_ref()) {
        match positions.get(author.login.as_str()) {
            Some(&index) => entries[index].count += 1,
            None => {
                positions.insert(author.login.as_str(), entries.len());
                entries.push(LeaderboardEntry {
                    user: author.login.clone(),
                    avatar_url: author.avatar_url.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable: ties stay in encounter order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Fetches issues for `repo` and tallies them.
///
/// With `all_pages` false only the first page is considered.
///
/// # Errors
///
/// Propagates fetch errors from [`IssueFetcher`].
#[instrument(skip(fetcher), fields(repo = %repo))]
pub async fn leaderboard(
    fetcher: &IssueFetcher,
    repo: &str,
    all_pages: bool,
) -> Result<Vec<LeaderboardEntry>> {
    let issues = if all_pages {
        fetcher.fetch_all_issues(repo).await?
    } else {
        fetcher.fetch_issues(repo, 1).await?
    };
    let entries = tally(&issues);
    debug!(issues = issues.len(), authors = entries.len(), "Leaderboard computed");
    Ok(entries)
}
