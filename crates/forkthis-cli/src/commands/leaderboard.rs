// SPDX-License-Identifier: Apache-2.0

//! Issue author leaderboard.

use anyhow::Result;
use forkthis_core::ForkThis;

use super::types::LeaderboardResult;

/// Counts issue authors; `all_pages` forces a full scan.
pub async fn run(app: &ForkThis, repo: &str, all_pages: bool) -> Result<LeaderboardResult> {
    let entries = app.leaderboard(repo, all_pages.then_some(true)).await?;
    Ok(LeaderboardResult {
        repo: repo.trim().to_string(),
        entries,
    })
}
