// SPDX-License-Identifier: Apache-2.0

//! Prompt construction and reply interpretation for issue summaries.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{SummaryPrompt, SummaryResult};
use crate::types::Difficulty;
use crate::utils::truncate_with_suffix;

/// Substituted for empty or whitespace-only issue bodies.
pub const EMPTY_BODY_PLACEHOLDER: &str = "No body text provided.";

const SYSTEM_PROMPT: &str = "You're an assistant that summarizes GitHub issues in 1 line and estimates their difficulty.";

/// First difficulty keyword anywhere in the reply, word boundaries not required.
static DIFFICULTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)(easy|medium|hard)").expect("valid difficulty regex")
});

/// Builds the prompt pair for an issue body.
///
/// Blank bodies are replaced with [`EMPTY_BODY_PLACEHOLDER`]; long bodies are
/// cut to `max_body_length` characters.
#[must_use]
pub fn build_prompt(body: &str, max_body_length: usize) -> SummaryPrompt {
    let body = if body.trim().is_empty() {
        EMPTY_BODY_PLACEHOLDER.to_string()
    } else {
        truncate_with_suffix(body, max_body_length, "\n[truncated]")
    };

    SummaryPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: format!(
            "Summarize this GitHub issue and estimate difficulty (Easy, Medium, Hard):\n\n{body}"
        ),
    }
}

/// Extracts the first difficulty keyword from a provider reply.
#[must_use]
pub fn extract_difficulty(reply: &str) -> Difficulty {
    DIFFICULTY_RE
        .find(reply)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}

/// Turns a raw provider reply into a summary result.
#[must_use]
pub fn parse_reply(reply: &str) -> SummaryResult {
    SummaryResult {
        summary: reply.trim().to_string(),
        difficulty: extract_difficulty(reply),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_uses_placeholder() {
        let prompt = build_prompt("  \n\t", 4000);
        assert!(prompt.user.ends_with(EMPTY_BODY_PLACEHOLDER));
        assert!(prompt.system.contains("1 line"));
    }

    #[test]
    fn long_body_is_truncated() {
        let body = "x".repeat(5000);
        let prompt = build_prompt(&body, 100);
        assert!(prompt.user.contains("[truncated]"));
        assert!(prompt.user.len() < 300);
    }

    #[test]
    fn first_keyword_wins_case_insensitive() {
        assert_eq!(
            extract_difficulty("Fix typo in README. difficulty: EASY, not hard"),
            Difficulty::Easy
        );
        assert_eq!(extract_difficulty("Medium effort."), Difficulty::Medium);
    }

    #[test]
    fn keyword_inside_word_still_matches() {
        // "hardware" contains "hard"; the match is not word-bounded
        assert_eq!(extract_difficulty("Upgrade hardware probe"), Difficulty::Hard);
    }

    #[test]
    fn no_keyword_is_unknown() {
        let result = parse_reply("  Refactor the parser.  \n");
        assert_eq!(result.summary, "Refactor the parser.");
        assert_eq!(result.difficulty, Difficulty::Unknown);
    }
}
