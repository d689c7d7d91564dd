// SPDX-License-Identifier: Apache-2.0

//! History commands.

use anyhow::Result;
use forkthis_core::WorkflowStore;

use super::types::{HistoryResult, MessageResult};

pub fn list(store: &WorkflowStore) -> Result<HistoryResult> {
    Ok(HistoryResult {
        entries: store.history()?,
    })
}

pub fn clear(store: &WorkflowStore) -> Result<MessageResult> {
    store.clear_history()?;
    Ok(MessageResult::new("History cleared"))
}

/// Removes the entry shown at `index` by `history list`.
pub fn remove(store: &WorkflowStore, index: usize) -> Result<MessageResult> {
    let entry = store.remove_history(index)?;
    Ok(MessageResult::new(format!(
        "Removed {}: {}",
        entry.kind, entry.detail
    )))
}
