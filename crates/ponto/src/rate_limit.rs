//! Per-client rate limiting for the ingest route.
//!
//! Clients are keyed by peer IP (from `ConnectInfo`). Requests without
//! connection info share a single bucket.

use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
    time::Instant,
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use ponto_core::ratelimit::{FixedWindow, RateLimitDecision, RateLimitPolicy};

use crate::handlers::ApiError;

/// Number of tracked clients above which expired windows are swept.
const SWEEP_THRESHOLD: usize = 1_024;

static RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
static RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
static RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Fixed-window limiter shared by all request tasks.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    windows: Arc<Mutex<HashMap<Option<IpAddr>, FixedWindow>>>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Counts one request from `client` at `now`.
    pub fn check(&self, client: Option<IpAddr>, now: Instant) -> RateLimitDecision {
        // The map is only ever left consistent, so a poisoned lock is still usable.
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        if windows.len() >= SWEEP_THRESHOLD {
            windows.retain(|_, window| !window.is_expired(&self.policy, now));
        }

        windows
            .entry(client)
            .or_insert_with(|| FixedWindow::new(now))
            .hit(&self.policy, now)
    }
}

/// Middleware: rejects clients over quota with 429 before the handler runs.
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(&request);
    let decision = limiter.check(client, Instant::now());

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        tracing::warn!(
            client = ?client,
            limit = decision.limit,
            reset_secs = decision.reset_secs(),
            "Rate limit exceeded"
        );
        let mut response = ApiError::RateLimited.into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(decision.reset_secs()));
        response
    };

    apply_headers(response.headers_mut(), &decision);
    response
}

fn client_ip(request: &Request) -> Option<IpAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(RATELIMIT_LIMIT.clone(), HeaderValue::from(decision.limit));
    headers.insert(
        RATELIMIT_REMAINING.clone(),
        HeaderValue::from(decision.remaining),
    );
    headers.insert(
        RATELIMIT_RESET.clone(),
        HeaderValue::from(decision.reset_secs()),
    );
}
