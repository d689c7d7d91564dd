// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # ForkThis Core
//!
//! Core library for ForkThis - find approachable GitHub issues, annotate them
//! with AI summaries and keep a local workflow around them.
//!
//! This crate provides reusable components for:
//! - GitHub issue fetching with a round-robin credential pool
//! - AI summaries through an ordered provider fallback chain
//! - A search feed where the most recent search always wins
//! - Local bookmarks, project snapshots and action history
//! - Per-author leaderboards and shareable filter links
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use forkthis_core::{EnvTokenProvider, ForkThis, WorkflowStore, load_config};
//!
//! # async fn example() -> forkthis_core::Result<()> {
//! let config = load_config()?;
//! let store = WorkflowStore::open(config.storage.resolve_path());
//! let app = ForkThis::new(config, Arc::new(EnvTokenProvider), store)?;
//!
//! app.feed().search("rust-lang/rust", true).await?;
//! for issue in app.feed().state()?.visible_issues() {
//!     println!("#{} {}", issue.number, issue.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ai`] - Provider adapters, fallback chain, difficulty parsing
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`feed`] - Search orchestration and incremental reveal
//! - [`github`] - Credential pool and issue fetching
//! - [`store`] - Bookmarks, projects, history, theme

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{EnvTokenProvider, StaticTokenProvider, TokenProvider, parse_token_list};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::ForkError;

/// Convenience Result type for ForkThis operations.
///
/// This is equivalent to `std::result::Result<T, ForkError>`.
pub type Result<T> = std::result::Result<T, ForkError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AiConfig, AppConfig, ChainLinkConfig, FeedConfig, GitHubConfig, LeaderboardConfig,
    ServerConfig, StorageConfig, config_dir, config_file_path, data_dir, load_config,
};

// ============================================================================
// Domain Types
// ============================================================================

pub use types::{Difficulty, Issue, IssueAuthor, IssueLabel, IssueState, LeaderboardEntry};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::credentials::CredentialPool;
pub use github::issues::{IssueFetcher, IssuesApi, OctocrabIssuesApi, PageError, RawIssue};
pub use github::parse_owner_repo;

// ============================================================================
// AI Summaries
// ============================================================================

pub use ai::{
    ChainLink, IssueSummarizer, ProviderAdapter, ProviderKind, Summarizer, SummaryPrompt,
    SummaryResult, default_chain,
};

// ============================================================================
// Feed, Filters and Leaderboard
// ============================================================================

pub use feed::{
    DEGRADED_SUMMARY, FETCH_FAILED_BANNER, FeedState, IssueFeed, QUOTA_BANNER, SearchOutcome,
};
pub use filters::{FeedFilters, SortOrder};
pub use leaderboard::tally;

// ============================================================================
// Workflow Store
// ============================================================================

pub use store::{
    FileStore, HISTORY_LIMIT, HistoryEntry, HistoryKind, ImportReport, KeyValueStore,
    MemoryStore, ProjectSnapshot, Theme, WorkflowStore,
};

// ============================================================================
// Share Links
// ============================================================================

pub use share::{from_query, share_url, to_query};

// ============================================================================
// Retry Logic
// ============================================================================

pub use retry::{is_retryable_transport, retry_backoff};

// ============================================================================
// Utilities
// ============================================================================

pub use utils::{format_relative_time, is_beginner_label, truncate, truncate_with_suffix};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{CredentialStatus, ForkThis};

// ============================================================================
// Modules
// ============================================================================

pub mod ai;
pub mod auth;
pub mod config;
pub mod error;
pub mod facade;
pub mod feed;
pub mod filters;
pub mod github;
pub mod leaderboard;
pub mod retry;
pub mod share;
pub mod store;
pub mod types;
pub mod utils;
