// SPDX-License-Identifier: Apache-2.0

//! AI summaries: provider adapters, the fallback chain and difficulty parsing.

pub mod chain;
pub mod chat;
pub mod circuit_breaker;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod registry;
pub mod types;

pub use chain::{ChainLink, DEFAULT_CHAIN, IssueSummarizer, Summarizer, default_chain};
pub use circuit_breaker::BreakerSet;
pub use prompt::{EMPTY_BODY_PLACEHOLDER, extract_difficulty};
pub use provider::ProviderAdapter;
pub use registry::{ProviderConfig, ProviderKind, all_providers, get_provider};
pub use types::{SummaryPrompt, SummaryResult};
