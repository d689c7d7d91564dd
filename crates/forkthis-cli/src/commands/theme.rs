// SPDX-License-Identifier: Apache-2.0

//! Theme commands.

use anyhow::Result;
use forkthis_core::{Theme, WorkflowStore};

use super::types::ThemeResult;

pub fn show(store: &WorkflowStore) -> Result<ThemeResult> {
    Ok(ThemeResult {
        theme: store.theme()?,
        available: Theme::ALL.to_vec(),
    })
}

pub fn set(store: &WorkflowStore, theme: Theme) -> Result<ThemeResult> {
    store.set_theme(theme)?;
    show(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_show() {
        let store = WorkflowStore::in_memory();
        assert_eq!(show(&store).unwrap().theme, Theme::Light);
        assert_eq!(set(&store, Theme::Terminal).unwrap().theme, Theme::Terminal);
        assert_eq!(show(&store).unwrap().available.len(), 5);
    }
}
