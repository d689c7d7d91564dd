// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the core and the CLI.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

static BEGINNER_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)good first issue|beginner|easy").expect("valid beginner label regex")
});

/// Truncates text to a maximum length with a custom suffix.
///
/// Counts characters, not bytes. The suffix is included in `max_len`.
///
/// # Examples
///
/// ```
/// use forkthis_core::utils::truncate_with_suffix;
///
/// let result = truncate_with_suffix("This is a very long issue title", 20, "...");
/// assert!(result.ends_with("..."));
/// assert_eq!(result.chars().count(), 20);
/// ```
#[must_use]
pub fn truncate_with_suffix(text: &str, max_len: usize, suffix: &str) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Truncates text with a trailing `...`.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with_suffix(text, max_len, "...")
}

/// Formats a timestamp relative to now ("3 days ago").
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use forkthis_core::utils::format_relative_time;
///
/// assert_eq!(format_relative_time(&Utc::now()), "just now");
/// assert_eq!(format_relative_time(&(Utc::now() - Duration::days(1))), "1 day ago");
/// ```
#[must_use]
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(*dt);
    let (amount, unit) = if elapsed.num_days() > 30 {
        (elapsed.num_days() / 30, "month")
    } else if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_string();
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Whether a label marks an issue as beginner-friendly.
///
/// Matches `good first issue`, `beginner` or `easy` anywhere in the name,
/// case-insensitively.
#[must_use]
pub fn is_beginner_label(label: &str) -> bool {
    BEGINNER_LABEL_RE.is_match(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate("Hello", 10), "Hello");
    }

    #[test]
    fn truncate_utf8_multibyte_safe() {
        let result = truncate("ünïcödé ünïcödé ünïcödé", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn relative_time_units() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&(now - Duration::minutes(5))), "5 minutes ago");
        assert_eq!(format_relative_time(&(now - Duration::hours(1))), "1 hour ago");
        assert_eq!(format_relative_time(&(now - Duration::days(3))), "3 days ago");
        assert_eq!(format_relative_time(&(now - Duration::days(65))), "2 months ago");
    }

    #[test]
    fn beginner_labels() {
        assert!(is_beginner_label("good first issue"));
        assert!(is_beginner_label("Good First Issue"));
        assert!(is_beginner_label("beginner-friendly"));
        assert!(is_beginner_label("E-easy"));
        assert!(!is_beginner_label("help wanted"));
        assert!(!is_beginner_label("bug"));
    }
}
