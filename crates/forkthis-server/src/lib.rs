// SPDX-License-Identifier: Apache-2.0

//! HTTP API exposing ForkThis issue search, AI summaries and leaderboards.
//!
//! Endpoints:
//! - `POST /issues` `{repo}` - first page of open issues, pull requests excluded
//! - `POST /summarize` `{body}` - one-line summary and difficulty
//! - `POST /leaderboard` `{repo}` - per-author issue counts
//! - `GET /health` - credential presence
//!
//! Failures answer with `{"error": "..."}`.

mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use forkthis_core::{AppConfig, EnvTokenProvider, ForkThis, WorkflowStore};
use tokio::net::TcpListener;

pub use error::ApiError;
pub use routes::{AppState, HealthResponse, RepoRequest, SummarizeRequest, router};

/// Builds the production context from configuration and the environment.
///
/// The server keeps history in memory only.
///
/// # Errors
///
/// Returns an error when the AI chain configuration is invalid.
pub fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let app = ForkThis::new(
        config,
        Arc::new(EnvTokenProvider),
        WorkflowStore::in_memory(),
    )?;
    let credentials = app.credentials();
    if credentials.github_tokens == 0 {
        tracing::warn!("No GitHub token configured; issue requests will fail");
    }
    if credentials.ai_providers.is_empty() {
        tracing::warn!("No AI provider key configured; summaries will fail");
    }
    Ok(Arc::new(app))
}

/// Run the HTTP server.
///
/// Serves the API on the specified host and port. Gracefully shuts down on
/// Ctrl+C.
pub async fn run_http(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting ForkThis HTTP server on {}:{}", host, port);

    // Handle both IPv4 and IPv6 addresses
    let addr: SocketAddr = if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
    .parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}
