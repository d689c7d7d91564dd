// SPDX-License-Identifier: Apache-2.0

//! Per-provider circuit breakers for the summarizer chain.
//!
//! A provider that keeps failing is skipped for a cool-down period instead of
//! being called for every issue in a search. Skipping behaves exactly like a
//! missing credential: the chain moves on to the next link.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use super::registry::ProviderKind;

#[derive(Debug, Default, Clone, Copy)]
struct ProviderHealth {
    consecutive_failures: u32,
    /// Set when the failure streak reached the threshold.
    tripped_at: Option<Instant>,
}

/// Consecutive-failure breakers, one per provider and shared by every link
/// that uses that provider.
///
/// A breaker trips after `threshold` failures in a row and stays open for
/// `cool_down`. Once the cool-down has passed one call is let through; a
/// further failure trips it again, a success resets it.
#[derive(Debug)]
pub struct BreakerSet {
    health: Mutex<HashMap<ProviderKind, ProviderHealth>>,
    threshold: u32,
    cool_down: Duration,
}

impl BreakerSet {
    /// Creates closed breakers. A zero threshold is treated as one.
    #[must_use]
    pub fn new(threshold: u32, reset_seconds: u64) -> Self {
        Self {
            health: Mutex::new(HashMap::new()),
            threshold: threshold.max(1),
            cool_down: Duration::from_secs(reset_seconds),
        }
    }

    // The map holds plain counters, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<ProviderKind, ProviderHealth>> {
        self.health.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether calls to `kind` should be skipped right now.
    #[must_use]
    pub fn is_open(&self, kind: ProviderKind) -> bool {
        self.lock()
            .get(&kind)
            .and_then(|h| h.tripped_at)
            .is_some_and(|at| at.elapsed() < self.cool_down)
    }

    /// Resets the failure streak of `kind`.
    pub fn record_success(&self, kind: ProviderKind) {
        self.lock().remove(&kind);
    }

    /// Extends the failure streak of `kind`, tripping it at the threshold.
    pub fn record_failure(&self, kind: ProviderKind) {
        let mut health = self.lock();
        let entry = health.entry(kind).or_default();
        entry.consecutive_failures = entry.consecutive_failures.saturating_add(1);
        if entry.consecutive_failures >= self.threshold {
            entry.tripped_at = Some(Instant::now());
            debug!(provider = %kind, failures = entry.consecutive_failures, "Circuit opened");
        }
    }

    /// Current failure streak of `kind`.
    #[must_use]
    pub fn failures(&self, kind: ProviderKind) -> u32 {
        self.lock()
            .get(&kind)
            .map_or(0, |h| h.consecutive_failures)
    }
}
