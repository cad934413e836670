//! # Rate Limiting
//!
//! A single process-wide limiter in front of the catalog endpoints. The
//! planner is CPU-bound per request (candidate windows × enumeration), so
//! the cap protects the process rather than any per-client fairness.
//!
//! `RIGPLAN_RATE_LIMIT` sets requests per second; unset or unparsable
//! values fall back to 100.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Fallback when the env var is absent or zero.
const DEFAULT_RPS: NonZeroU32 = NonZeroU32::new(100).unwrap();

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Process-wide limiter shared by every route.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Build the limiter for the given requests-per-second quota.
///
/// A quota of 0 is treated as "use the default" rather than an error.
pub fn create_rate_limiter(requests_per_second: u32) -> GlobalRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(DEFAULT_RPS);
    let quota = Quota::per_second(rps);
    Arc::new(RateLimiter::direct(quota))
}

/// Read the quota from `RIGPLAN_RATE_LIMIT`.
pub fn get_rate_limit_from_env() -> u32 {
    std::env::var("RIGPLAN_RATE_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100)
}

/// Reject with 429 once the quota is exhausted.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    match limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded");
            Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_admits_within_quota() {
        let limiter = create_rate_limiter(50);
        assert!(limiter.check().is_ok());
    }

    #[test]
    fn zero_quota_falls_back_to_default() {
        let limiter = create_rate_limiter(0);
        assert!(limiter.check().is_ok());
    }
}
