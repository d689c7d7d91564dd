// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the HTTP routes, driven through `tower::ServiceExt`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use forkthis_core::{
    AppConfig, CredentialPool, CredentialStatus, Difficulty, ForkError, ForkThis, IssueFetcher,
    IssueSummarizer, IssuesApi, PageError, ProviderKind, RawIssue, SummaryResult, WorkflowStore,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Answers every page request with the same canned result.
struct CannedIssues {
    result: Mutex<Result<Vec<RawIssue>, PageError>>,
}

#[async_trait]
impl IssuesApi for CannedIssues {
    async fn list_page(
        &self,
        _token: &SecretString,
        _owner: &str,
        _name: &str,
        _page: u32,
        _per_page: u8,
    ) -> Result<Vec<RawIssue>, PageError> {
        self.result.lock().unwrap().clone()
    }
}

struct CannedSummary(Option<&'static str>);

#[async_trait]
impl IssueSummarizer for CannedSummary {
    async fn summarize(&self, _body: &str) -> forkthis_core::Result<SummaryResult> {
        match self.0 {
            Some(reply) => Ok(SummaryResult {
                summary: reply.to_string(),
                difficulty: Difficulty::Medium,
            }),
            None => Err(ForkError::AllProvidersFailed {
                attempted: 0,
                quota_exhausted: false,
            }),
        }
    }
}

fn raw(number: u64, author: &str, pull_request: bool) -> RawIssue {
    let mut value = json!({
        "number": number,
        "title": format!("Issue {number}"),
        "body": "Something is broken",
        "user": {"login": author, "avatar_url": "https://avatars.example/a"},
        "labels": [{"name": "bug", "color": "d73a4a"}],
        "state": "open",
        "created_at": "2024-03-01T12:00:00Z",
        "updated_at": "2024-03-02T12:00:00Z",
        "html_url": format!("https://github.com/octo/repo/issues/{number}"),
    });
    if pull_request {
        value["pull_request"] = json!({"url": "https://api.github.com/pulls/1"});
    }
    serde_json::from_value(value).unwrap()
}

fn app(
    issues: Result<Vec<RawIssue>, PageError>,
    summary: Option<&'static str>,
) -> axum::Router {
    let api = Arc::new(CannedIssues {
        result: Mutex::new(issues),
    });
    let pool = CredentialPool::new(vec![SecretString::from("t1".to_string())]);
    let fetcher = Arc::new(IssueFetcher::new(api, pool, 100));
    let app = ForkThis::from_parts(
        AppConfig::default(),
        fetcher,
        Arc::new(CannedSummary(summary)),
        WorkflowStore::in_memory(),
        CredentialStatus {
            github_tokens: 1,
            ai_providers: vec![ProviderKind::Groq],
        },
    );
    forkthis_server::router(Arc::new(app))
}

async fn post(router: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn issues_excludes_pull_requests() {
    let router = app(
        Ok(vec![raw(1, "alice", false), raw(2, "bob", true)]),
        None,
    );
    let (status, body) = post(router, "/issues", json!({"repo": "octo/repo"})).await;

    assert_eq!(status, StatusCode::OK);
    let issues = body.as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["number"], 1);
    assert_eq!(issues[0]["user"]["login"], "alice");
    assert_eq!(issues[0]["labels"][0]["name"], "bug");
    assert_eq!(issues[0]["summary"], "");
    assert_eq!(issues[0]["difficulty"], "Unknown");
}

#[tokio::test]
async fn issues_rejects_malformed_repo() {
    for body in [json!({"repo": "nope"}), json!({})] {
        let router = app(Ok(vec![]), None);
        let (status, body) = post(router, "/issues", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid repo format"}));
    }
}

#[tokio::test]
async fn issues_passes_upstream_status_through() {
    let router = app(Err(PageError::Status(404)), None);
    let (status, body) = post(router, "/issues", json!({"repo": "octo/missing"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "GitHub API error"}));
}

#[tokio::test]
async fn issues_reports_exhausted_credentials() {
    let router = app(Err(PageError::Status(401)), None);
    let (status, body) = post(router, "/issues", json!({"repo": "octo/repo"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("exhausted"));
}

#[tokio::test]
async fn summarize_returns_summary_and_difficulty() {
    let router = app(Ok(vec![]), Some("Fix the typo. Easy"));
    let (status, body) = post(router, "/summarize", json!({"body": "typo in README"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"summary": "Fix the typo. Easy", "difficulty": "Medium"}));
}

#[tokio::test]
async fn summarize_failure_is_500_with_banner() {
    let router = app(Ok(vec![]), None);
    let (status, body) = post(router, "/summarize", json!({"body": ""})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "AI summary failed. All fallback models failed."})
    );
}

#[tokio::test]
async fn leaderboard_counts_authors() {
    let router = app(
        Ok(vec![
            raw(1, "alice", false),
            raw(2, "bob", false),
            raw(3, "alice", false),
        ]),
        None,
    );
    let (status, body) = post(router, "/leaderboard", json!({"repo": "octo/repo"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["user"], "alice");
    assert_eq!(body[0]["count"], 2);
    assert_eq!(body[1]["user"], "bob");
}

#[tokio::test]
async fn health_reports_credentials() {
    let router = app(Ok(vec![]), None);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["credentials"]["github_tokens"], 1);
    assert_eq!(body["credentials"]["ai_providers"], json!(["groq"]));
}
