// SPDX-License-Identifier: Apache-2.0

//! Round-robin pool of GitHub tokens.

use std::sync::atomic::{AtomicUsize, Ordering};

use secrecy::SecretString;

use crate::auth::TokenProvider;

/// Ordered GitHub credentials with a shared rotation cursor.
///
/// Every call to [`CredentialPool::rotate`] advances the cursor, whether or not
/// the returned token turns out to work, so load spreads across tokens over
/// successive requests.
#[derive(Debug)]
pub struct CredentialPool {
    tokens: Vec<SecretString>,
    cursor: AtomicUsize,
}

impl CredentialPool {
    /// Creates a pool starting at the first token.
    #[must_use]
    pub fn new(tokens: Vec<SecretString>) -> Self {
        Self {
            tokens,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Builds a pool from a token provider.
    #[must_use]
    pub fn from_provider(provider: &dyn TokenProvider) -> Self {
        Self::new(provider.github_tokens())
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no token is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the current token with its index and advances the cursor.
    #[must_use]
    pub fn rotate(&self) -> Option<(usize, SecretString)> {
        if self.tokens.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.tokens.len();
        Some((index, self.tokens[index].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn pool(tokens: &[&str]) -> CredentialPool {
        CredentialPool::new(
            tokens
                .iter()
                .map(|t| SecretString::from((*t).to_string()))
                .collect(),
        )
    }

    #[test]
    fn rotates_and_wraps() {
        let p = pool(&["a", "b", "c"]);
        let seen: Vec<String> = (0..5)
            .filter_map(|_| p.rotate())
            .map(|(_, t)| t.expose_secret().to_string())
            .collect();
        assert_eq!(seen, vec!["a", "b", "c", "a", "b"]);
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let p = pool(&[]);
        assert!(p.is_empty());
        assert!(p.rotate().is_none());
    }
}
