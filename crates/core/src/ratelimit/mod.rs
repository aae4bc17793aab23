//! Fixed-window request accounting.
//!
//! Pure bookkeeping only: callers pass the current [`Instant`] in and own
//! the storage of windows (one per client).

use std::time::{Duration, Instant};

/// How many requests a client may make per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Allowed requests per window.
    pub max_requests: u32,
    /// Length of a window.
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// The configured quota.
    pub limit: u32,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// Time until the current window closes.
    pub reset_after: Duration,
}

impl RateLimitDecision {
    /// Seconds until reset, rounded up, as sent in `RateLimit-Reset`.
    pub fn reset_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

/// One client's counter for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWindow {
    started_at: Instant,
    hits: u32,
}

impl FixedWindow {
    pub fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            hits: 0,
        }
    }

    /// True once the window that started at `started_at` is over.
    pub fn is_expired(&self, policy: &RateLimitPolicy, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= policy.window
    }

    /// Counts one request and decides whether it may proceed.
    ///
    /// Rejected requests still count, so a client hammering the endpoint
    /// stays limited until the window rolls over.
    pub fn hit(&mut self, policy: &RateLimitPolicy, now: Instant) -> RateLimitDecision {
        if self.is_expired(policy, now) {
            *self = Self::new(now);
        }

        self.hits = self.hits.saturating_add(1);

        let elapsed = now.saturating_duration_since(self.started_at);
        RateLimitDecision {
            allowed: self.hits <= policy.max_requests,
            limit: policy.max_requests,
            remaining: policy.max_requests.saturating_sub(self.hits),
            reset_after: policy.window.saturating_sub(elapsed),
        }
    }
}
