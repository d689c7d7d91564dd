// SPDX-License-Identifier: Apache-2.0

//! Client-side filtering and sorting of the exposed feed.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, Issue, IssueState};
use crate::utils::is_beginner_label;

/// Sort key for the feed view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently updated first.
    #[default]
    Newest,
    /// Least recently updated first.
    Oldest,
    /// Title, case-insensitive.
    Title,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Title => "title",
        })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "title" => Ok(SortOrder::Title),
            other => Err(format!("Unknown sort order: {other}")),
        }
    }
}

/// Filter and sort settings applied to the exposed prefix of a search.
///
/// All filters combine conjunctively. `None` for `difficulty` or `label`
/// means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedFilters {
    /// Exact difficulty to keep.
    pub difficulty: Option<Difficulty>,
    /// Exact label name to keep.
    pub label: Option<String>,
    /// Sort key.
    pub sort: SortOrder,
    /// Keep open issues only.
    #[serde(alias = "openOnly")]
    pub open_only: bool,
    /// Keep issues with a beginner-friendly label only.
    #[serde(alias = "beginnerOnly")]
    pub beginner_only: bool,
    /// Keep bookmarked issues only.
    #[serde(alias = "bookmarksOnly")]
    pub bookmarks_only: bool,
}

impl FeedFilters {
    /// Whether a single issue passes every active filter.
    #[must_use]
    pub fn matches(&self, issue: &Issue, bookmarks: &BTreeSet<u64>) -> bool {
        if let Some(label) = self.label.as_deref()
            && !issue.label_names().any(|name| name == label)
        {
            return false;
        }
        if let Some(difficulty) = self.difficulty
            && issue.difficulty != difficulty
        {
            return false;
        }
        if self.open_only && issue.state != IssueState::Open {
            return false;
        }
        if self.beginner_only && !issue.label_names().any(is_beginner_label) {
            return false;
        }
        if self.bookmarks_only && !bookmarks.contains(&issue.number) {
            return false;
        }
        true
    }

    /// Filters then sorts `issues`, returning a new list.
    ///
    /// The sort is stable, so issues with equal keys keep fetch order.
    #[must_use]
    pub fn apply(&self, issues: &[Issue], bookmarks: &BTreeSet<u64>) -> Vec<Issue> {
        let mut kept: Vec<Issue> = issues
            .iter()
            .filter(|issue| self.matches(issue, bookmarks))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Newest => kept.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            SortOrder::Oldest => kept.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
            SortOrder::Title => kept.sort_by_cached_key(|issue| issue.title.to_lowercase()),
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::issue;

    fn sample() -> Vec<Issue> {
        let mut closed = issue(3, "beta crash", &["bug"], Some("carol"));
        closed.state = IssueState::Closed;
        let mut easy = issue(2, "Alpha docs", &["good first issue", "docs"], Some("bob"));
        easy.difficulty = Difficulty::Easy;
        vec![issue(1, "Gamma refactor", &["enhancement"], Some("alice")), easy, closed]
    }

    fn numbers(issues: &[Issue]) -> Vec<u64> {
        issues.iter().map(|i| i.number).collect()
    }

    #[test]
    fn default_filters_sort_newest_first() {
        let out = FeedFilters::default().apply(&sample(), &BTreeSet::new());
        assert_eq!(numbers(&out), vec![3, 2, 1]);
    }

    #[test]
    fn oldest_and_title_orders() {
        let oldest = FeedFilters {
            sort: SortOrder::Oldest,
            ..FeedFilters::default()
        };
        assert_eq!(numbers(&oldest.apply(&sample(), &BTreeSet::new())), vec![1, 2, 3]);

        let title = FeedFilters {
            sort: SortOrder::Title,
            ..FeedFilters::default()
        };
        assert_eq!(numbers(&title.apply(&sample(), &BTreeSet::new())), vec![2, 3, 1]);
    }

    #[test]
    fn filters_combine_conjunctively() {
        let filters = FeedFilters {
            open_only: true,
            beginner_only: true,
            difficulty: Some(Difficulty::Easy),
            ..FeedFilters::default()
        };
        assert_eq!(numbers(&filters.apply(&sample(), &BTreeSet::new())), vec![2]);

        let none = FeedFilters {
            difficulty: Some(Difficulty::Hard),
            beginner_only: true,
            ..FeedFilters::default()
        };
        assert!(none.apply(&sample(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn label_match_is_exact() {
        let filters = FeedFilters {
            label: Some("doc".to_string()),
            ..FeedFilters::default()
        };
        assert!(filters.apply(&sample(), &BTreeSet::new()).is_empty());

        let filters = FeedFilters {
            label: Some("docs".to_string()),
            ..FeedFilters::default()
        };
        assert_eq!(numbers(&filters.apply(&sample(), &BTreeSet::new())), vec![2]);
    }

    #[test]
    fn bookmarks_only_uses_supplied_set() {
        let filters = FeedFilters {
            bookmarks_only: true,
            ..FeedFilters::default()
        };
        let marks = BTreeSet::from([1, 3]);
        assert_eq!(numbers(&filters.apply(&sample(), &marks)), vec![3, 1]);
    }

    #[test]
    fn sort_order_parses() {
        assert_eq!("Title".parse::<SortOrder>().unwrap(), SortOrder::Title);
        assert!("random".parse::<SortOrder>().is_err());
    }
}
