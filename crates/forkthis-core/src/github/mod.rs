// SPDX-License-Identifier: Apache-2.0

//! GitHub integration: credential pool and issue fetching.

pub mod credentials;
pub mod issues;

use crate::Result;
use crate::error::ForkError;

/// Parses an `owner/name` repository identifier.
///
/// Validates format: exactly one `/`, non-empty parts. Surrounding whitespace
/// is ignored.
///
/// # Errors
///
/// Returns `ForkError::InvalidRepoFormat` if the format is invalid.
pub fn parse_owner_repo(s: &str) -> Result<(String, String)> {
    let trimmed = s.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ForkError::InvalidRepoFormat {
            input: s.to_string(),
        });
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_owner_slash_name() {
        assert_eq!(
            parse_owner_repo(" rust-lang/rust ").unwrap(),
            ("rust-lang".to_string(), "rust".to_string())
        );
    }

    #[test]
    fn rejects_malformed_inputs() {
        for input in ["", "rust", "/rust", "rust-lang/", "a/b/c", "a//b"] {
            assert!(
                matches!(
                    parse_owner_repo(input),
                    Err(ForkError::InvalidRepoFormat { .. })
                ),
                "expected rejection for {input:?}"
            );
        }
    }
}
