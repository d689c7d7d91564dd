// SPDX-License-Identifier: Apache-2.0

//! One-off issue summaries.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use forkthis_core::{ForkThis, SummaryResult};

/// Reads the issue body from `--body`, `--from` or stdin, in that order.
pub fn read_body(body: Option<String>, from: Option<&Path>) -> Result<String> {
    if let Some(body) = body {
        return Ok(body);
    }
    if let Some(path) = from {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read issue body from {}", path.display()));
    }
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read issue body from stdin")?;
    Ok(body)
}

/// Summarizes an issue body with the fallback chain.
pub async fn run(app: &ForkThis, body: &str) -> Result<SummaryResult> {
    Ok(app.summarize(body).await?)
}
