// SPDX-License-Identifier: Apache-2.0

//! Shareable links carrying the full filter, sort and display state.
//!
//! Parameters: `repo`, `difficulty`, `label`, `sort`, `open`, `beginner`,
//! `bookmarks`, `summary`. Values at their default are omitted when encoding.
//! Unknown parameters are ignored and malformed values decode as defaults.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::debug;

use crate::filters::SortOrder;
use crate::store::ProjectSnapshot;

/// Characters escaped in query values; RFC 3986 unreserved characters pass.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn push(pairs: &mut Vec<String>, key: &str, value: &str) {
    pairs.push(format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)));
}

fn flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// Encodes a snapshot as a query string without the leading `?`.
#[must_use]
pub fn to_query(snapshot: &ProjectSnapshot) -> String {
    let filters = &snapshot.filters;
    let mut pairs = Vec::new();

    if !snapshot.repo.is_empty() {
        push(&mut pairs, "repo", &snapshot.repo);
    }
    if let Some(difficulty) = filters.difficulty {
        push(&mut pairs, "difficulty", &difficulty.to_string());
    }
    if let Some(label) = filters.label.as_deref().filter(|l| !l.is_empty()) {
        push(&mut pairs, "label", label);
    }
    if filters.sort != SortOrder::default() {
        push(&mut pairs, "sort", &filters.sort.to_string());
    }
    for (key, on) in [
        ("open", filters.open_only),
        ("beginner", filters.beginner_only),
        ("bookmarks", filters.bookmarks_only),
        ("summary", snapshot.ai_summary),
    ] {
        if on {
            push(&mut pairs, key, "true");
        }
    }
    pairs.join("&")
}

/// Decodes a query string (with or without a leading `?`) into a snapshot.
#[must_use]
pub fn from_query(query: &str) -> ProjectSnapshot {
    let mut snapshot = ProjectSnapshot::default();
    let query = query.trim().trim_start_matches('?');

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let value = percent_decode_str(&raw.replace('+', " "))
            .decode_utf8_lossy()
            .into_owned();
        let filters = &mut snapshot.filters;

        match key {
            "repo" => snapshot.repo = value.trim().to_string(),
            // "All" and anything unrecognized clear the filter
            "difficulty" => filters.difficulty = value.parse().ok(),
            "label" => filters.label = Some(value).filter(|l| !l.is_empty()),
            "sort" => filters.sort = value.parse().unwrap_or_default(),
            "open" => filters.open_only = flag(&value),
            "beginner" => filters.beginner_only = flag(&value),
            "bookmarks" => filters.bookmarks_only = flag(&value),
            "summary" => snapshot.ai_summary = flag(&value),
            other => debug!(key = other, "Ignoring unknown share parameter"),
        }
    }
    snapshot
}

/// Joins `base` and the encoded snapshot into a link.
#[must_use]
pub fn share_url(base: &str, snapshot: &ProjectSnapshot) -> String {
    let query = to_query(snapshot);
    let base = base.trim_end_matches(['?', '&']);
    if query.is_empty() {
        return base.to_string();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
