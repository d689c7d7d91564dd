// SPDX-License-Identifier: Apache-2.0

//! Error types for ForkThis.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Binaries use `anyhow::Result` for top-level error handling and downcast
//! to [`ForkError`] when they need to present a variant differently.

use thiserror::Error;

/// Errors that can occur during ForkThis operations.
#[derive(Error, Debug)]
pub enum ForkError {
    /// Repository identifier is not of the form `owner/name`.
    #[error("Invalid repo format: expected owner/name, got '{input}'")]
    InvalidRepoFormat {
        /// The rejected input.
        input: String,
    },

    /// A bookmark or project write was attempted without a repository.
    #[error("No repository selected - search a repository first")]
    MissingRepository,

    /// GitHub answered with a non-success status other than 401/403.
    #[error("GitHub API error (HTTP {status})")]
    Upstream {
        /// HTTP status returned by GitHub.
        status: u16,
    },

    /// Every pooled GitHub credential was rejected.
    #[error("All GitHub tokens are exhausted or invalid ({attempts} attempted)")]
    CredentialsExhausted {
        /// Number of credentials tried.
        attempts: usize,
    },

    /// Every link of the summarizer chain was skipped or failed.
    #[error("AI summary failed. All fallback models failed.")]
    AllProvidersFailed {
        /// Number of links actually called.
        attempted: usize,
        /// Whether any provider reported an exhausted quota.
        quota_exhausted: bool,
    },

    /// Transport failure talking to GitHub.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// A single AI provider call failed.
    #[error("AI provider error: {message}")]
    AI {
        /// Error message from the AI provider.
        message: String,
        /// Optional HTTP status code from the provider.
        status: Option<u16>,
        /// Name of the AI provider (e.g., `groq`, `gemini`).
        provider: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Local workflow store could not be read or written.
    #[error("Storage error: {message}")]
    Storage {
        /// Error message.
        message: String,
    },

    /// Project names must contain something other than whitespace.
    #[error("Project name cannot be empty")]
    InvalidProjectName {
        /// The rejected name.
        name: String,
    },

    /// No project snapshot is saved under this name.
    #[error("Project '{name}' not found")]
    ProjectNotFound {
        /// Requested project name.
        name: String,
    },

    /// Theme name is not one of the known themes.
    #[error("Unknown theme '{name}'")]
    UnknownTheme {
        /// Requested theme name.
        name: String,
    },

    /// History index is past the end of the list.
    #[error("No history entry at index {index}")]
    HistoryIndexOutOfRange {
        /// Requested index.
        index: usize,
    },

    /// Imported project document is not a map of snapshots.
    #[error("Invalid file.")]
    InvalidImport(#[source] serde_json::Error),
}

impl ForkError {
    /// Returns true when the error means an AI provider ran out of quota.
    #[must_use]
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            ForkError::AllProvidersFailed {
                quota_exhausted, ..
            } => *quota_exhausted,
            ForkError::AI {
                status, message, ..
            } => *status == Some(429) || message.contains("insufficient_quota"),
            _ => false,
        }
    }
}

impl From<config::ConfigError> for ForkError {
    fn from(err: config::ConfigError) -> Self {
        ForkError::Config {
            message: err.to_string(),
        }
    }
}
