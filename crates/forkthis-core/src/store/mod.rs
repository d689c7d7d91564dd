// SPDX-License-Identifier: Apache-2.0

//! Local workflow store: bookmarks, project snapshots, history and UI state.
//!
//! Every value is JSON under a `forkthis:` key of a [`KeyValueStore`]. A value
//! that fails to decode is logged and read as its default, never as an error.

pub mod kv;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use kv::{FileStore, KeyValueStore, MemoryStore};

use crate::Result;
use crate::error::ForkError;
use crate::filters::FeedFilters;

/// Maximum number of history entries kept.
pub const HISTORY_LIMIT: usize = 100;

const KEY_LAST_REPO: &str = "forkthis:last-repo";
const KEY_BOOKMARKS: &str = "forkthis:bookmarks";
const KEY_ACTIVE_PROJECT: &str = "forkthis:active-project";
const KEY_HISTORY: &str = "forkthis:history";
const KEY_THEME: &str = "forkthis:theme";
const PROJECT_PREFIX: &str = "forkthis:project:";
// Key prefix used by exports from the browser application.
const LEGACY_PROJECT_PREFIX: &str = "forkthis-project:";

/// Kind of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryKind {
    /// A repository search.
    Search,
    /// An issue was bookmarked.
    Bookmark,
    /// A bookmark was removed.
    #[serde(rename = "Remove Bookmark")]
    RemoveBookmark,
    /// A leaderboard was generated.
    Leaderboard,
    /// A project snapshot was saved.
    #[serde(rename = "Project Save")]
    ProjectSave,
    /// A project snapshot was loaded.
    #[serde(rename = "Project Load")]
    ProjectLoad,
    /// A project snapshot was deleted.
    #[serde(rename = "Project Delete")]
    ProjectDelete,
    /// Project snapshots were imported.
    #[serde(rename = "Project Import")]
    ProjectImport,
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HistoryKind::Search => "Search",
            HistoryKind::Bookmark => "Bookmark",
            HistoryKind::RemoveBookmark => "Remove Bookmark",
            HistoryKind::Leaderboard => "Leaderboard",
            HistoryKind::ProjectSave => "Project Save",
            HistoryKind::ProjectLoad => "Project Load",
            HistoryKind::ProjectDelete => "Project Delete",
            HistoryKind::ProjectImport => "Project Import",
        })
    }
}

/// One logged user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Action kind.
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    /// Human-readable detail.
    pub detail: String,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

/// Color theme of the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
    /// Neon on black.
    Cyberpunk,
    /// Green on black.
    Terminal,
    /// Gold accents.
    Luxe,
}

impl Theme {
    /// Every theme in menu order.
    pub const ALL: [Theme; 5] = [
        Theme::Light,
        Theme::Dark,
        Theme::Cyberpunk,
        Theme::Terminal,
        Theme::Luxe,
    ];
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Terminal => "terminal",
            Theme::Luxe => "luxe",
        })
    }
}

impl FromStr for Theme {
    type Err = ForkError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.to_string() == wanted)
            .ok_or_else(|| ForkError::UnknownTheme {
                name: s.to_string(),
            })
    }
}

/// A saved combination of filters, display flags and target repository.
///
/// Keys are snake_case on write. Documents written by the browser build use
/// camelCase flags, which are accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Repository the project searches.
    #[serde(default)]
    pub repo: String,
    /// Whether AI summaries are requested.
    #[serde(default, alias = "aiSummary")]
    pub ai_summary: bool,
    /// Filter and sort settings.
    #[serde(flatten)]
    pub filters: FeedFilters,
}

/// Outcome of [`WorkflowStore::import_projects`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of snapshots written.
    pub written: usize,
    /// Names that already existed before the import.
    pub conflicts: Vec<String>,
    /// True when the overwrite confirmation was declined.
    pub cancelled: bool,
}

/// Typed access to the persisted workflow state.
///
/// Cloning shares the backend and the write lock.
#[derive(Clone)]
pub struct WorkflowStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl fmt::Debug for WorkflowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowStore").finish_non_exhaustive()
    }
}

impl WorkflowStore {
    /// Wraps a key-value backend.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store backed by memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Store backed by a JSON file.
    #[must_use]
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(path)))
    }

    fn locked(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| ForkError::Storage {
            message: "workflow store lock poisoned".to_string(),
        })
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring corrupt stored value");
                Ok(T::default())
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|e| ForkError::Storage {
            message: format!("Failed to serialize {key}: {e}"),
        })?;
        self.kv.set(key, &raw)
    }

    // === Last repository / theme ===

    /// Repository searched most recently, if any.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn last_repo(&self) -> Result<Option<String>> {
        let repo: Option<String> = self.read_json(KEY_LAST_REPO)?;
        Ok(repo.filter(|r| !r.trim().is_empty()))
    }

    /// Records the repository searched most recently.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn set_last_repo(&self, repo: &str) -> Result<()> {
        self.write_json(KEY_LAST_REPO, repo.trim())
    }

    /// Current theme.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn theme(&self) -> Result<Theme> {
        self.read_json(KEY_THEME)
    }

    /// Persists the theme.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.write_json(KEY_THEME, &theme)
    }

    // === Bookmarks ===

    /// Every bookmark, keyed by repository.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn all_bookmarks(&self) -> Result<BTreeMap<String, BTreeSet<u64>>> {
        self.read_json(KEY_BOOKMARKS)
    }

    /// Bookmarked issue numbers of one repository.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn bookmarks(&self, repo: &str) -> Result<BTreeSet<u64>> {
        Ok(self
            .all_bookmarks()?
            .remove(repo.trim())
            .unwrap_or_default())
    }

    /// Whether an issue is bookmarked.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn is_bookmarked(&self, repo: &str, number: u64) -> Result<bool> {
        Ok(self.bookmarks(repo)?.contains(&number))
    }

    /// Flips the bookmark on an issue and logs the action.
    ///
    /// Returns `true` when the issue is bookmarked afterwards.
    ///
    /// # Errors
    ///
    /// - `MissingRepository` when `repo` is blank
    /// - `Storage` when the backend fails
    pub fn toggle_bookmark(&self, repo: &str, number: u64) -> Result<bool> {
        let repo = repo.trim();
        if repo.is_empty() {
            return Err(ForkError::MissingRepository);
        }

        let bookmarked = {
            let _guard = self.locked()?;
            let mut all = self.all_bookmarks()?;
            let set = all.entry(repo.to_string()).or_default();
            let bookmarked = if set.remove(&number) {
                false
            } else {
                set.insert(number);
                true
            };
            if set.is_empty() {
                all.remove(repo);
            }
            self.write_json(KEY_BOOKMARKS, &all)?;
            bookmarked
        };

        let kind = if bookmarked {
            HistoryKind::Bookmark
        } else {
            HistoryKind::RemoveBookmark
        };
        self.log(kind, format!("{kind} issue #{number} in {repo}"))?;
        debug!(repo, number, bookmarked, "Bookmark toggled");
        Ok(bookmarked)
    }

    // === Projects ===

    fn project_key(name: &str) -> String {
        format!("{PROJECT_PREFIX}{name}")
    }

    fn validate_name(name: &str) -> Result<&str> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ForkError::InvalidProjectName {
                name: name.to_string(),
            });
        }
        Ok(trimmed)
    }

    /// Saves (or overwrites) a project snapshot.
    ///
    /// # Errors
    ///
    /// - `InvalidProjectName` when `name` is blank
    /// - `MissingRepository` when the snapshot has no repository
    /// - `Storage` when the backend fails
    pub fn save_project(&self, name: &str, snapshot: &ProjectSnapshot) -> Result<()> {
        let name = Self::validate_name(name)?;
        if snapshot.repo.trim().is_empty() {
            return Err(ForkError::MissingRepository);
        }
        self.write_json(&Self::project_key(name), snapshot)?;
        self.log(HistoryKind::ProjectSave, format!("Saved project {name}"))?;
        info!(project = name, repo = %snapshot.repo, "Project saved");
        Ok(())
    }

    fn read_project(&self, name: &str) -> Result<Option<ProjectSnapshot>> {
        let Some(raw) = self.kv.get(&Self::project_key(name))? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(project = name, error = %e, "Ignoring corrupt project snapshot");
                Ok(None)
            }
        }
    }

    /// Reads a project snapshot.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` when no readable snapshot has that name
    /// - `Storage` when the backend fails
    pub fn load_project(&self, name: &str) -> Result<ProjectSnapshot> {
        let name = name.trim();
        self.read_project(name)?
            .ok_or_else(|| ForkError::ProjectNotFound {
                name: name.to_string(),
            })
    }

    /// Loads a project, marks it active and logs the action.
    ///
    /// # Errors
    ///
    /// Same as [`WorkflowStore::load_project`].
    pub fn activate_project(&self, name: &str) -> Result<ProjectSnapshot> {
        let snapshot = self.load_project(name)?;
        let name = name.trim();
        self.write_json(KEY_ACTIVE_PROJECT, name)?;
        self.log(HistoryKind::ProjectLoad, format!("Loaded project {name}"))?;
        Ok(snapshot)
    }

    /// Name of the project loaded last, if it still exists.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn active_project(&self) -> Result<Option<String>> {
        let name: Option<String> = self.read_json(KEY_ACTIVE_PROJECT)?;
        match name {
            Some(name) if self.kv.get(&Self::project_key(&name))?.is_some() => Ok(Some(name)),
            _ => Ok(None),
        }
    }

    /// Deletes a project snapshot.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` when no snapshot has that name
    /// - `Storage` when the backend fails
    pub fn delete_project(&self, name: &str) -> Result<()> {
        let name = name.trim();
        let key = Self::project_key(name);
        if self.kv.get(&key)?.is_none() {
            return Err(ForkError::ProjectNotFound {
                name: name.to_string(),
            });
        }
        self.kv.remove(&key)?;

        let active: Option<String> = self.read_json(KEY_ACTIVE_PROJECT)?;
        if active.as_deref() == Some(name) {
            self.kv.remove(KEY_ACTIVE_PROJECT)?;
        }
        self.log(HistoryKind::ProjectDelete, format!("Deleted project {name}"))?;
        Ok(())
    }

    /// Every readable project, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn list_projects(&self) -> Result<Vec<(String, ProjectSnapshot)>> {
        let mut projects = Vec::new();
        for key in self.kv.keys()? {
            let Some(name) = key.strip_prefix(PROJECT_PREFIX) else {
                continue;
            };
            if let Some(snapshot) = self.read_project(name)? {
                projects.push((name.to_string(), snapshot));
            }
        }
        projects.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(projects)
    }

    /// Serializes every project as one pretty-printed `{name: snapshot}` JSON
    /// document.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn export_projects(&self) -> Result<String> {
        let projects: BTreeMap<String, ProjectSnapshot> =
            self.list_projects()?.into_iter().collect();
        serde_json::to_string_pretty(&projects).map_err(|e| ForkError::Storage {
            message: format!("Failed to serialize projects: {e}"),
        })
    }

    /// Imports a `{name: snapshot}` document.
    ///
    /// Names may carry the `forkthis-project:` prefix used by browser exports.
    /// When any name already exists, `confirm` receives the conflicting names;
    /// answering `false` cancels the import without writing anything.
    ///
    /// # Errors
    ///
    /// - `InvalidImport` when the document is not a snapshot map
    /// - `InvalidProjectName` when a name is blank
    /// - `Storage` when the backend fails
    pub fn import_projects(
        &self,
        document: &str,
        confirm: impl FnOnce(&[String]) -> bool,
    ) -> Result<ImportReport> {
        let parsed: BTreeMap<String, ProjectSnapshot> =
            serde_json::from_str(document).map_err(ForkError::InvalidImport)?;

        let mut projects = Vec::with_capacity(parsed.len());
        for (raw_name, snapshot) in parsed {
            let name = raw_name
                .strip_prefix(LEGACY_PROJECT_PREFIX)
                .or_else(|| raw_name.strip_prefix(PROJECT_PREFIX))
                .unwrap_or(&raw_name);
            projects.push((Self::validate_name(name)?.to_string(), snapshot));
        }

        let mut conflicts = Vec::new();
        for (name, _) in &projects {
            if self.kv.get(&Self::project_key(name))?.is_some() {
                conflicts.push(name.clone());
            }
        }
        if !conflicts.is_empty() && !confirm(&conflicts) {
            info!(conflicts = conflicts.len(), "Project import cancelled");
            return Ok(ImportReport {
                written: 0,
                conflicts,
                cancelled: true,
            });
        }

        for (name, snapshot) in &projects {
            self.write_json(&Self::project_key(name), snapshot)?;
        }
        let written = projects.len();
        let plural = if written == 1 { "" } else { "s" };
        self.log(
            HistoryKind::ProjectImport,
            format!("Imported {written} project{plural}"),
        )?;
        Ok(ImportReport {
            written,
            conflicts,
            cancelled: false,
        })
    }

    // === History ===

    /// History, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.read_json(KEY_HISTORY)
    }

    /// Prepends a history entry, evicting the oldest beyond [`HISTORY_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn log(&self, kind: HistoryKind, detail: impl Into<String>) -> Result<()> {
        let _guard = self.locked()?;
        let mut history = self.history()?;
        history.insert(
            0,
            HistoryEntry {
                kind,
                detail: detail.into(),
                timestamp: Utc::now(),
            },
        );
        history.truncate(HISTORY_LIMIT);
        self.write_json(KEY_HISTORY, &history)
    }

    /// Removes every history entry.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend fails.
    pub fn clear_history(&self) -> Result<()> {
        let _guard = self.locked()?;
        self.kv.remove(KEY_HISTORY)
    }

    /// Removes one history entry by its position in [`WorkflowStore::history`].
    ///
    /// # Errors
    ///
    /// - `HistoryIndexOutOfRange` when `index` is past the end
    /// - `Storage` when the backend fails
    pub fn remove_history(&self, index: usize) -> Result<HistoryEntry> {
        let _guard = self.locked()?;
        let mut history = self.history()?;
        if index >= history.len() {
            return Err(ForkError::HistoryIndexOutOfRange { index });
        }
        let removed = history.remove(index);
        self.write_json(KEY_HISTORY, &history)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SortOrder;
    use crate::types::Difficulty;
    use tempfile::TempDir;

    fn snapshot(repo: &str) -> ProjectSnapshot {
        ProjectSnapshot {
            repo: repo.to_string(),
            ai_summary: true,
            filters: FeedFilters {
                difficulty: Some(Difficulty::Easy),
                label: Some("docs".to_string()),
                sort: SortOrder::Title,
                open_only: true,
                beginner_only: false,
                bookmarks_only: false,
            },
        }
    }

    #[test]
    fn toggle_twice_restores_state_and_logs_both() {
        let store = WorkflowStore::in_memory();
        assert!(store.toggle_bookmark("octo/repo", 7).unwrap());
        assert!(store.is_bookmarked("octo/repo", 7).unwrap());
        assert!(!store.toggle_bookmark("octo/repo", 7).unwrap());
        assert!(store.bookmarks("octo/repo").unwrap().is_empty());
        assert!(store.all_bookmarks().unwrap().is_empty());

        let history = store.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, HistoryKind::RemoveBookmark);
        assert_eq!(history[0].detail, "Remove Bookmark issue #7 in octo/repo");
        assert_eq!(history[1].detail, "Bookmark issue #7 in octo/repo");
    }

    #[test]
    fn bookmarks_are_per_repository() {
        let store = WorkflowStore::in_memory();
        store.toggle_bookmark("a/one", 1).unwrap();
        store.toggle_bookmark("b/two", 1).unwrap();
        store.toggle_bookmark("b/two", 2).unwrap();
        let all = store.all_bookmarks().unwrap();
        assert_eq!(all["a/one"], BTreeSet::from([1]));
        assert_eq!(all["b/two"], BTreeSet::from([1, 2]));
    }

    #[test]
    fn bookmark_without_repo_is_rejected() {
        let store = WorkflowStore::in_memory();
        assert!(matches!(
            store.toggle_bookmark("  ", 1),
            Err(ForkError::MissingRepository)
        ));
        assert!(store.all_bookmarks().unwrap().is_empty());
        assert!(store.history().unwrap().is_empty());
    }

    #[test]
    fn history_is_capped_newest_first() {
        let store = WorkflowStore::in_memory();
        for i in 0..105 {
            store.log(HistoryKind::Search, format!("entry {i}")).unwrap();
        }
        let history = store.history().unwrap();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].detail, "entry 104");
        assert_eq!(history[HISTORY_LIMIT - 1].detail, "entry 5");
    }

    #[test]
    fn history_remove_and_clear() {
        let store = WorkflowStore::in_memory();
        store.log(HistoryKind::Search, "first").unwrap();
        store.log(HistoryKind::Leaderboard, "second").unwrap();

        let removed = store.remove_history(0).unwrap();
        assert_eq!(removed.detail, "second");
        assert!(matches!(
            store.remove_history(5),
            Err(ForkError::HistoryIndexOutOfRange { index: 5 })
        ));

        store.clear_history().unwrap();
        assert!(store.history().unwrap().is_empty());
    }

    #[test]
    fn history_kind_serializes_with_display_name() {
        let json = serde_json::to_string(&HistoryKind::RemoveBookmark).unwrap();
        assert_eq!(json, "\"Remove Bookmark\"");
    }

    #[test]
    fn corrupt_values_read_as_defaults() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(KEY_HISTORY, "[oops").unwrap();
        kv.set(KEY_BOOKMARKS, "42").unwrap();
        kv.set(KEY_THEME, "\"neon\"").unwrap();
        kv.set("forkthis:project:broken", "{").unwrap();

        let store = WorkflowStore::new(kv);
        assert!(store.history().unwrap().is_empty());
        assert!(store.all_bookmarks().unwrap().is_empty());
        assert_eq!(store.theme().unwrap(), Theme::Light);
        assert!(store.list_projects().unwrap().is_empty());
        assert!(matches!(
            store.load_project("broken"),
            Err(ForkError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn project_lifecycle() {
        let store = WorkflowStore::in_memory();
        store.save_project("docs", &snapshot("octo/repo")).unwrap();
        store.save_project("alpha", &snapshot("other/repo")).unwrap();

        let names: Vec<String> = store
            .list_projects()
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["alpha", "docs"]);

        let loaded = store.activate_project("docs").unwrap();
        assert_eq!(loaded, snapshot("octo/repo"));
        assert_eq!(store.active_project().unwrap().as_deref(), Some("docs"));

        store.delete_project("docs").unwrap();
        assert_eq!(store.active_project().unwrap(), None);
        assert!(matches!(
            store.delete_project("docs"),
            Err(ForkError::ProjectNotFound { .. })
        ));
        assert_eq!(store.history().unwrap()[0].kind, HistoryKind::ProjectDelete);
    }

    #[test]
    fn save_requires_name_and_repo() {
        let store = WorkflowStore::in_memory();
        assert!(matches!(
            store.save_project(" ", &snapshot("octo/repo")),
            Err(ForkError::InvalidProjectName { .. })
        ));
        assert!(matches!(
            store.save_project("p", &snapshot("")),
            Err(ForkError::MissingRepository)
        ));
    }

    #[test]
    fn snapshot_json_uses_flat_layout() {
        let json = serde_json::to_value(snapshot("octo/repo")).unwrap();
        assert_eq!(json["repo"], "octo/repo");
        assert_eq!(json["ai_summary"], true);
        assert_eq!(json["open_only"], true);
        assert_eq!(json["beginner_only"], false);
        assert_eq!(json["sort"], "title");
        assert_eq!(json["difficulty"], "Easy");
        assert!(json.get("aiSummary").is_none());
    }

    #[test]
    fn snapshot_accepts_camel_case_flags() {
        let snapshot: ProjectSnapshot = serde_json::from_str(
            r#"{"repo": "octo/repo", "aiSummary": true, "openOnly": true, "bookmarksOnly": true}"#,
        )
        .unwrap();
        assert!(snapshot.ai_summary);
        assert!(snapshot.filters.open_only);
        assert!(snapshot.filters.bookmarks_only);
        assert!(!snapshot.filters.beginner_only);
    }

    #[test]
    fn export_then_import_into_fresh_store() {
        let source = WorkflowStore::in_memory();
        source.save_project("docs", &snapshot("octo/repo")).unwrap();
        let document = source.export_projects().unwrap();

        let target = WorkflowStore::in_memory();
        let report = target
            .import_projects(&document, |_| panic!("no conflicts expected"))
            .unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(target.load_project("docs").unwrap(), snapshot("octo/repo"));
    }

    #[test]
    fn declined_conflict_writes_nothing() {
        let store = WorkflowStore::in_memory();
        store.save_project("docs", &snapshot("octo/repo")).unwrap();

        let document = r#"{
            "docs": {"repo": "new/repo"},
            "fresh": {"repo": "fresh/repo"}
        }"#;
        let report = store
            .import_projects(document, |names| {
                assert_eq!(names, ["docs".to_string()]);
                false
            })
            .unwrap();
        assert!(report.cancelled);
        assert_eq!(report.written, 0);
        assert_eq!(store.load_project("docs").unwrap().repo, "octo/repo");
        assert!(store.load_project("fresh").is_err());
    }

    #[test]
    fn accepted_conflict_overwrites_and_strips_browser_prefix() {
        let store = WorkflowStore::in_memory();
        store.save_project("docs", &snapshot("octo/repo")).unwrap();

        let document = r#"{"forkthis-project:docs": {"repo": "new/repo", "open_only": true}}"#;
        let report = store.import_projects(document, |_| true).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.conflicts, vec!["docs".to_string()]);
        let loaded = store.load_project("docs").unwrap();
        assert_eq!(loaded.repo, "new/repo");
        assert!(loaded.filters.open_only);
    }

    #[test]
    fn invalid_import_document() {
        let store = WorkflowStore::in_memory();
        let err = store.import_projects("[1, 2]", |_| true).unwrap_err();
        assert_eq!(err.to_string(), "Invalid file.");
    }

    #[test]
    fn theme_round_trips_through_file_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let store = WorkflowStore::open(&path);
        assert_eq!(store.theme().unwrap(), Theme::Light);
        store.set_theme("Cyberpunk".parse().unwrap()).unwrap();
        store.set_last_repo(" octo/repo ").unwrap();

        let reopened = WorkflowStore::open(&path);
        assert_eq!(reopened.theme().unwrap(), Theme::Cyberpunk);
        assert_eq!(reopened.last_repo().unwrap().as_deref(), Some("octo/repo"));
        assert!(matches!(
            "neon".parse::<Theme>(),
            Err(ForkError::UnknownTheme { .. })
        ));
    }
}
