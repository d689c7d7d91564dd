// SPDX-License-Identifier: Apache-2.0

//! Route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use forkthis_core::{CredentialStatus, ForkThis, Issue, LeaderboardEntry, SummaryResult};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;

/// Shared handler state.
pub type AppState = Arc<ForkThis>;

/// Body of `POST /issues` and `POST /leaderboard`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RepoRequest {
    /// Repository in `owner/name` form.
    pub repo: String,
}

/// Body of `POST /summarize`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SummarizeRequest {
    /// Issue body text; blank bodies get a placeholder.
    pub body: String,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Credential presence.
    pub credentials: CredentialStatus,
}

/// Builds the router over a shared application context.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/issues", post(issues))
        .route("/summarize", post(summarize))
        .route("/leaderboard", post(leaderboard))
        .route("/health", get(health))
        .with_state(state)
}

#[instrument(skip(app), fields(repo = %req.repo))]
async fn issues(
    State(app): State<AppState>,
    Json(req): Json<RepoRequest>,
) -> Result<Json<Vec<Issue>>, ApiError> {
    let issues = app.fetch_issues(&req.repo).await?;
    info!(count = issues.len(), "Issues fetched");
    Ok(Json(issues))
}

#[instrument(skip_all, fields(body_len = req.body.len()))]
async fn summarize(
    State(app): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummaryResult>, ApiError> {
    Ok(Json(app.summarize(&req.body).await?))
}

#[instrument(skip(app), fields(repo = %req.repo))]
async fn leaderboard(
    State(app): State<AppState>,
    Json(req): Json<RepoRequest>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    Ok(Json(app.leaderboard(&req.repo, None).await?))
}

async fn health(State(app): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        credentials: app.credentials().clone(),
    })
}
