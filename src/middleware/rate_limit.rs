//! Keyed token-bucket limits built on `governor`.
//!
//! Clients are keyed by the peer address from `ConnectInfo`. The first
//! `X-Forwarded-For` address is used instead only when the limit is built
//! with `trust_forwarded_for`. Requests with no usable key share one bucket.
//!
//! Each limiter prunes idle client entries in the background so the keyed
//! state does not grow without bound.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock, DefaultClock},
};
use serde_json::json;
use tracing::{debug, warn};

use crate::metrics::track_rate_limited;

/// How often idle client entries are dropped.
const RETAIN_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct RateLimit {
    scope: &'static str,
    trust_forwarded_for: bool,
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
}

impl RateLimit {
    /// Builds the limiter and, when called inside a tokio runtime, starts
    /// its cleanup task. The task stops once every clone is dropped.
    pub fn new(scope: &'static str, quota: Quota, trust_forwarded_for: bool) -> Self {
        let limiter = Arc::new(RateLimiter::keyed(quota));

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let weak = Arc::downgrade(&limiter);
            runtime.spawn(async move {
                let mut interval = tokio::time::interval(RETAIN_INTERVAL);
                interval.tick().await;
                loop {
                    interval.tick().await;
                    let Some(limiter) = weak.upgrade() else {
                        break;
                    };
                    limiter.retain_recent();
                    debug!(scope, clients = limiter.len(), "pruned rate limit state");
                }
            });
        }

        Self {
            scope,
            trust_forwarded_for,
            limiter,
        }
    }

    /// Drops clients whose buckets have fully refilled.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    fn client_key(&self, req: &Request) -> String {
        if self.trust_forwarded_for {
            let forwarded = req
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());

            if let Some(ip) = forwarded {
                return ip.to_string();
            }
        }

        peer_key(req)
    }
}

fn peer_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let key = rate_limit.client_key(&req);

    match rate_limit.limiter.check_key(&key) {
        Ok(()) => next.run(req).await,
        Err(not_until) => {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            let retry_after = wait.as_secs().max(1);

            warn!(scope = rate_limit.scope, client = %key, retry_after, "rate limit exceeded");
            track_rate_limited(rate_limit.scope);

            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "Too many requests, please slow down" })),
            )
                .into_response();
            if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}
