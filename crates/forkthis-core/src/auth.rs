// SPDX-License-Identifier: Apache-2.0

//! Credential resolution for GitHub and the AI providers.
//!
//! The [`TokenProvider`] trait abstracts where credentials come from so the
//! CLI and the HTTP server can share the fetcher and summarizer. The
//! environment-backed implementation covers both binaries; tests inject
//! [`StaticTokenProvider`].

use std::collections::HashMap;

use secrecy::SecretString;
use tracing::debug;

use crate::ai::registry::ProviderKind;

/// Environment variable holding a comma-separated GitHub token pool.
pub const GITHUB_TOKENS_ENV: &str = "GITHUB_TOKENS";

/// Single-token fallbacks, checked in order when the pool variable is unset.
const GITHUB_TOKEN_FALLBACK_ENVS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Provides GitHub and AI provider credentials for API calls.
///
/// Implementations return an empty pool or `None` when a credential is not
/// available; absence is never an error at this layer.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the ordered GitHub token pool.
    fn github_tokens(&self) -> Vec<SecretString>;

    /// Retrieves the API key for an AI provider.
    fn ai_key(&self, provider: ProviderKind) -> Option<SecretString>;
}

/// Splits a comma-separated token list, dropping blank entries.
#[must_use]
pub fn parse_token_list(raw: &str) -> Vec<SecretString> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| SecretString::from(t.to_string()))
        .collect()
}

/// Resolves credentials from environment variables.
///
/// - GitHub: `GITHUB_TOKENS` (comma-separated), else `GITHUB_TOKEN`, else `GH_TOKEN`
/// - AI providers: the variable named in the provider registry
///   (`GROQ_API_KEY`, `GEMINI_API_KEY`, `OPENAI_API_KEY`, `OPENROUTER_API_KEY`)
///
/// Empty values count as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvTokenProvider;

impl TokenProvider for EnvTokenProvider {
    fn github_tokens(&self) -> Vec<SecretString> {
        if let Ok(raw) = std::env::var(GITHUB_TOKENS_ENV) {
            let tokens = parse_token_list(&raw);
            if !tokens.is_empty() {
                debug!(count = tokens.len(), "Resolved GitHub token pool from environment");
                return tokens;
            }
        }

        for var in GITHUB_TOKEN_FALLBACK_ENVS {
            match std::env::var(var) {
                Ok(token) if !token.trim().is_empty() => {
                    debug!(source = var, "Resolved single GitHub token from environment");
                    return vec![SecretString::from(token.trim().to_string())];
                }
                _ => {}
            }
        }

        debug!("No GitHub token found in environment");
        Vec::new()
    }

    fn ai_key(&self, provider: ProviderKind) -> Option<SecretString> {
        let var = provider.config().api_key_env;
        match std::env::var(var) {
            Ok(key) if !key.is_empty() => {
                debug!(provider = %provider, "Resolved API key from environment variable");
                Some(SecretString::from(key))
            }
            _ => {
                debug!(provider = %provider, "No API key found in environment");
                None
            }
        }
    }
}

/// Fixed in-memory credentials.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenProvider {
    github: Vec<SecretString>,
    ai: HashMap<ProviderKind, SecretString>,
}

impl StaticTokenProvider {
    /// Creates a provider with no credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a GitHub token to the end of the pool.
    #[must_use]
    pub fn with_github_token(mut self, token: &str) -> Self {
        self.github.push(SecretString::from(token.to_string()));
        self
    }

    /// Sets the API key for a provider.
    #[must_use]
    pub fn with_ai_key(mut self, provider: ProviderKind, key: &str) -> Self {
        self.ai.insert(provider, SecretString::from(key.to_string()));
        self
    }
}

impl TokenProvider for StaticTokenProvider {
    fn github_tokens(&self) -> Vec<SecretString> {
        self.github.clone()
    }

    fn ai_key(&self, provider: ProviderKind) -> Option<SecretString> {
        self.ai.get(&provider).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[allow(unsafe_code)]
    fn clear_env() {
        // SAFETY: callers are #[serial]; no other thread reads these vars.
        unsafe {
            std::env::remove_var(GITHUB_TOKENS_ENV);
            std::env::remove_var("GITHUB_TOKEN");
            std::env::remove_var("GH_TOKEN");
            std::env::remove_var("GROQ_API_KEY");
        }
    }

    #[allow(unsafe_code)]
    fn set_env(key: &str, value: &str) {
        // SAFETY: callers are #[serial]; no other thread reads these vars.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    #[test]
    fn parse_token_list_trims_and_drops_blanks() {
        let tokens = parse_token_list(" a , ,b,, c ");
        let exposed: Vec<&str> = tokens.iter().map(|t| t.expose_secret()).collect();
        assert_eq!(exposed, vec!["a", "b", "c"]);
    }

    #[test]
    #[serial]
    fn pool_variable_wins_over_single_token() {
        clear_env();
        set_env(GITHUB_TOKENS_ENV, "t1,t2");
        set_env("GITHUB_TOKEN", "single");

        let tokens = EnvTokenProvider.github_tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].expose_secret(), "t1");
        clear_env();
    }

    #[test]
    #[serial]
    fn single_token_fallback() {
        clear_env();
        set_env("GH_TOKEN", "gh");

        let tokens = EnvTokenProvider.github_tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].expose_secret(), "gh");
        clear_env();
    }

    #[test]
    #[serial]
    fn empty_ai_key_counts_as_absent() {
        clear_env();
        set_env("GROQ_API_KEY", "");
        assert!(EnvTokenProvider.ai_key(ProviderKind::Groq).is_none());

        set_env("GROQ_API_KEY", "gsk");
        assert!(EnvTokenProvider.ai_key(ProviderKind::Groq).is_some());
        clear_env();
    }

    #[test]
    fn static_provider_returns_configured_values() {
        let provider = StaticTokenProvider::new()
            .with_github_token("a")
            .with_github_token("b")
            .with_ai_key(ProviderKind::Gemini, "g");

        assert_eq!(provider.github_tokens().len(), 2);
        assert!(provider.ai_key(ProviderKind::Gemini).is_some());
        assert!(provider.ai_key(ProviderKind::OpenAi).is_none());
    }
}
