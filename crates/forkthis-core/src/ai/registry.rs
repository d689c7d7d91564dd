// SPDX-License-Identifier: Apache-2.0

//! Centralized provider configuration registry.
//!
//! Static metadata for every AI provider the summarizer can call: endpoint,
//! credential variable and wire format.
//!
//! # Examples
//!
//! ```
//! use forkthis_core::ai::registry::{ProviderKind, get_provider};
//!
//! let groq = get_provider("groq").unwrap();
//! assert_eq!(groq.kind, ProviderKind::Groq);
//! assert_eq!(groq.api_key_env, "GROQ_API_KEY");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Request/response shape spoken by a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireFormat {
    /// OpenAI-style `chat/completions` with bearer auth.
    ChatCompletions,
    /// Gemini `generateContent` with the key in the query string.
    GeminiGenerate,
}

/// AI providers known to the summarizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Groq (OpenAI-compatible).
    Groq,
    /// Google Gemini.
    Gemini,
    /// `OpenAI`.
    #[serde(rename = "openai")]
    OpenAi,
    /// `OpenRouter` (OpenAI-compatible with attribution headers).
    #[serde(rename = "openrouter")]
    OpenRouter,
}

impl ProviderKind {
    /// Every provider, in registry order.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Groq,
        ProviderKind::Gemini,
        ProviderKind::OpenAi,
        ProviderKind::OpenRouter,
    ];

    /// Static configuration for this provider.
    #[must_use]
    pub fn config(self) -> &'static ProviderConfig {
        match self {
            ProviderKind::Groq => &PROVIDERS[0],
            ProviderKind::Gemini => &PROVIDERS[1],
            ProviderKind::OpenAi => &PROVIDERS[2],
            ProviderKind::OpenRouter => &PROVIDERS[3],
        }
    }

    /// Lowercase identifier used in config files and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.config().name
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        get_provider(s)
            .map(|p| p.kind)
            .ok_or_else(|| format!("Unknown AI provider: {s}"))
    }
}

/// Configuration for an AI provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Provider kind.
    pub kind: ProviderKind,

    /// Provider identifier (lowercase, used in config files)
    pub name: &'static str,

    /// Human-readable provider name for UI display
    pub display_name: &'static str,

    /// API endpoint. For Gemini this is a prefix completed with the model.
    pub api_url: &'static str,

    /// Environment variable name for API key
    pub api_key_env: &'static str,

    /// Wire format spoken by the endpoint
    pub wire: WireFormat,
}

// ============================================================================
// Provider Registry
// ============================================================================

/// All supported providers. Order must match [`ProviderKind::config`].
pub static PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        kind: ProviderKind::Groq,
        name: "groq",
        display_name: "Groq",
        api_url: "https://api.groq.com/openai/v1/chat/completions",
        api_key_env: "GROQ_API_KEY",
        wire: WireFormat::ChatCompletions,
    },
    ProviderConfig {
        kind: ProviderKind::Gemini,
        name: "gemini",
        display_name: "Google Gemini",
        api_url: "https://generativelanguage.googleapis.com/v1beta/models",
        api_key_env: "GEMINI_API_KEY",
        wire: WireFormat::GeminiGenerate,
    },
    ProviderConfig {
        kind: ProviderKind::OpenAi,
        name: "openai",
        display_name: "OpenAI",
        api_url: "https://api.openai.com/v1/chat/completions",
        api_key_env: "OPENAI_API_KEY",
        wire: WireFormat::ChatCompletions,
    },
    ProviderConfig {
        kind: ProviderKind::OpenRouter,
        name: "openrouter",
        display_name: "OpenRouter",
        api_url: "https://openrouter.ai/api/v1/chat/completions",
        api_key_env: "OPENROUTER_API_KEY",
        wire: WireFormat::ChatCompletions,
    },
];

/// Retrieves a provider configuration by name (case-insensitive).
#[must_use]
pub fn get_provider(name: &str) -> Option<&'static ProviderConfig> {
    PROVIDERS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// Retrieves all provider configurations.
#[must_use]
pub fn all_providers() -> &'static [ProviderConfig] {
    PROVIDERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lookup_matches_kind() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.config().kind, kind);
        }
    }

    #[test]
    fn get_provider_is_case_insensitive() {
        assert_eq!(
            get_provider("OpenRouter").map(|p| p.kind),
            Some(ProviderKind::OpenRouter)
        );
        assert!(get_provider("cerebras").is_none());
    }

    #[test]
    fn parse_and_display_roundtrip_names() {
        let kind: ProviderKind = "openai".parse().unwrap();
        assert_eq!(kind, ProviderKind::OpenAi);
        assert_eq!(kind.to_string(), "openai");
        assert!("nope".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn only_gemini_uses_native_wire_format() {
        let native: Vec<_> = all_providers()
            .iter()
            .filter(|p| p.wire == WireFormat::GeminiGenerate)
            .map(|p| p.kind)
            .collect();
        assert_eq!(native, vec![ProviderKind::Gemini]);
    }
}
