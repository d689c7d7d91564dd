// SPDX-License-Identifier: Apache-2.0

//! Saved project commands.

use std::path::Path;

use anyhow::{Context, Result};
use forkthis_core::{FeedFilters, ForkThis, ProjectSnapshot, WorkflowStore, share_url};

use super::search;
use super::types::{
    ExportResult, ImportResult, MessageResult, ProjectListResult, ProjectRow, ProjectSavedResult,
    SearchResult, ShareResult,
};

/// Saves the given settings under `name`.
pub fn save(
    store: &WorkflowStore,
    name: &str,
    repo: Option<String>,
    summaries: bool,
    filters: FeedFilters,
) -> Result<ProjectSavedResult> {
    let snapshot = ProjectSnapshot {
        repo: search::resolve_repo(store, repo)?,
        ai_summary: summaries,
        filters,
    };
    store.save_project(name, &snapshot)?;
    Ok(ProjectSavedResult {
        name: name.trim().to_string(),
        snapshot,
    })
}

/// Activates a project, runs its search and applies its filters.
pub async fn load(app: &ForkThis, name: &str) -> Result<SearchResult> {
    let (snapshot, _) = app.feed().restore_project(name).await?;
    search::view(app, &snapshot.filters, Some(name.trim().to_string()))
}

pub fn delete(store: &WorkflowStore, name: &str) -> Result<MessageResult> {
    store.delete_project(name)?;
    Ok(MessageResult::new(format!("Deleted project {}", name.trim())))
}

pub fn list(store: &WorkflowStore) -> Result<ProjectListResult> {
    let active = store.active_project()?;
    let projects = store
        .list_projects()?
        .into_iter()
        .map(|(name, snapshot)| ProjectRow {
            active: active.as_deref() == Some(name.as_str()),
            name,
            snapshot,
        })
        .collect();
    Ok(ProjectListResult { projects })
}

/// Returns the export document.
pub fn export_document(store: &WorkflowStore) -> Result<String> {
    Ok(store.export_projects()?)
}

/// Writes the export document to `path`.
pub fn export_to_file(store: &WorkflowStore, path: &Path) -> Result<ExportResult> {
    let document = export_document(store)?;
    std::fs::write(path, &document)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    Ok(ExportResult {
        path: path.to_path_buf(),
        count: store.list_projects()?.len(),
    })
}

/// Imports an exported document; `confirm` decides on overwriting.
pub fn import(
    store: &WorkflowStore,
    path: &Path,
    confirm: impl FnOnce(&[String]) -> bool,
) -> Result<ImportResult> {
    let document = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let report = store.import_projects(&document, confirm)?;
    Ok(ImportResult {
        written: report.written,
        conflicts: report.conflicts,
        cancelled: report.cancelled,
    })
}

/// Builds a shareable link for a saved project.
pub fn share(store: &WorkflowStore, name: &str, base: &str) -> Result<ShareResult> {
    let snapshot = store.load_project(name)?;
    Ok(ShareResult {
        name: name.trim().to_string(),
        url: share_url(base, &snapshot),
    })
}
