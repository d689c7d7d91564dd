// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers and consumed by renderers.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use forkthis_core::{HistoryEntry, Issue, LeaderboardEntry, ProjectSnapshot, Theme};
use serde::Serialize;

/// Filtered view of a committed search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Repository searched.
    pub repo: String,
    /// Project the search was restored from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Visible issues after filters and sort.
    pub issues: Vec<Issue>,
    /// Number of issues revealed before filtering.
    pub revealed: usize,
    /// Number of issues fetched.
    pub fetched: usize,
    /// Whether more fetched issues can be revealed.
    pub has_more: bool,
    /// Label names across the fetched issues.
    pub labels: Vec<String>,
    /// Bookmarked issue numbers of the repository.
    pub bookmarks: BTreeSet<u64>,
    /// Banner raised by the search, e.g. an exhausted AI quota.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

/// Leaderboard of one repository.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResult {
    /// Repository counted.
    pub repo: String,
    /// Entries, most issues first.
    pub entries: Vec<LeaderboardEntry>,
}

/// Outcome of `bookmark toggle`.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkToggleResult {
    /// Repository of the issue.
    pub repo: String,
    /// Issue number.
    pub number: u64,
    /// True when the issue is now bookmarked.
    pub bookmarked: bool,
}

/// Bookmarks grouped by repository.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkListResult {
    /// Issue numbers per repository.
    pub bookmarks: BTreeMap<String, BTreeSet<u64>>,
}

/// One saved project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    /// Project name.
    pub name: String,
    /// Whether this is the active project.
    pub active: bool,
    /// Saved settings.
    #[serde(flatten)]
    pub snapshot: ProjectSnapshot,
}

/// Saved projects, sorted by name.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListResult {
    /// Projects.
    pub projects: Vec<ProjectRow>,
}

/// Outcome of `project save`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSavedResult {
    /// Project name.
    pub name: String,
    /// Stored settings.
    pub snapshot: ProjectSnapshot,
}

/// Outcome of `project export --file`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// File written.
    pub path: PathBuf,
    /// Number of projects exported.
    pub count: usize,
}

/// Outcome of `project import`.
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    /// Number of projects written.
    pub written: usize,
    /// Names that already existed.
    pub conflicts: Vec<String>,
    /// True when overwriting was declined.
    pub cancelled: bool,
}

/// Outcome of `project share`.
#[derive(Debug, Clone, Serialize)]
pub struct ShareResult {
    /// Project name.
    pub name: String,
    /// Shareable link.
    pub url: String,
}

/// Logged actions, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResult {
    /// Entries.
    pub entries: Vec<HistoryEntry>,
}

/// Stored theme and the alternatives.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeResult {
    /// Current theme.
    pub theme: Theme,
    /// Every known theme.
    pub available: Vec<Theme>,
}

/// Plain confirmation message for commands without other output.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResult {
    /// Message shown to the user.
    pub message: String,
}

impl MessageResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
