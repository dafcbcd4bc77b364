//! # Middleware Module
//!
//! Rate limiting for the HTTP bridge.
//!
//! ## Configuration
//!
//! - `COOP_EXAMPLE_RATE_LIMIT`: requests per second (default: 100, 0 disables)

use super::types::ErrorResponse;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Environment variable holding the rate limit.
pub const RATE_LIMIT_ENV: &str = "COOP_EXAMPLE_RATE_LIMIT";

/// 100 requests per second.
const DEFAULT_RPS: NonZeroU32 = NonZeroU32::MIN.saturating_add(99);

/// One bucket shared by every client of the bridge.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Create the shared limiter. Zero falls back to the default.
pub fn create_rate_limiter(requests_per_second: u32) -> GlobalRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(DEFAULT_RPS);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Requests per second from `COOP_EXAMPLE_RATE_LIMIT`.
///
/// Unset or unparsable values give the default; `0` disables limiting.
pub fn get_rate_limit_from_env() -> u32 {
    match std::env::var(RATE_LIMIT_ENV) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "Invalid {}, using default", RATE_LIMIT_ENV);
            DEFAULT_RPS.get()
        }),
        Err(_) => DEFAULT_RPS.get(),
    }
}

/// Answers 429 with a `Retry-After` hint once the bucket is empty.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let not_until = match limiter.check() {
        Ok(()) => return next.run(request).await,
        Err(not_until) => not_until,
    };

    let retry_after = not_until
        .wait_time_from(DefaultClock::default().now())
        .as_secs()
        .max(1);
    tracing::warn!(path = %request.uri().path(), retry_after, "Rate limit exceeded");

    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse::new("Too many requests")),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
