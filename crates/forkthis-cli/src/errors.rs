// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `ForkError` and appends a tip for the
//! variants a user can act on. The library keeps structured data; the
//! wording lives here.

use std::fmt::Write;

use anyhow::Error;
use forkthis_core::ai::all_providers;
use forkthis_core::{FETCH_FAILED_BANNER, ForkError, QUOTA_BANNER};

fn api_key_vars() -> String {
    all_providers()
        .iter()
        .map(|p| p.api_key_env)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `ForkError`, returns the full error chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<ForkError>() else {
        return format!("{error:#}");
    };

    match err {
        ForkError::InvalidRepoFormat { .. } => {
            format!("{err}\n\nTip: Use the owner/name form, e.g. rust-lang/rust.")
        }
        ForkError::MissingRepository => {
            "No repository selected\n\nTip: Run `forkthis search <owner/name>` first or pass --repo."
                .to_string()
        }
        ForkError::Upstream { .. } => format!("{FETCH_FAILED_BANNER}\n\n{err}"),
        ForkError::GitHub { .. } => format!(
            "{FETCH_FAILED_BANNER}\n\n{err}\n\nTip: Check your internet connection and try again."
        ),
        ForkError::CredentialsExhausted { .. } => format!(
            "{err}\n\nTip: Set GITHUB_TOKENS (comma-separated) or GITHUB_TOKEN to valid tokens."
        ),
        ForkError::AllProvidersFailed {
            quota_exhausted: true,
            ..
        } => QUOTA_BANNER.to_string(),
        ForkError::AllProvidersFailed { attempted: 0, .. } => {
            let mut msg = err.to_string();
            let _ = write!(
                msg,
                "\n\nTip: Set at least one of {} to enable summaries.",
                api_key_vars()
            );
            msg
        }
        ForkError::Config { .. } => format!(
            "{err}\n\nTip: Check your config file at {}",
            forkthis_core::config_file_path().display()
        ),
        ForkError::ProjectNotFound { .. } => {
            format!("{err}\n\nTip: Run `forkthis project list` to see saved projects.")
        }
        ForkError::HistoryIndexOutOfRange { .. } => {
            format!("{err}\n\nTip: Run `forkthis history list` to see valid indexes.")
        }
        ForkError::UnknownTheme { .. } => {
            format!("{err}\n\nTip: Available themes are light, dark, cyberpunk, terminal and luxe.")
        }
        _ => err.to_string(),
    }
}
