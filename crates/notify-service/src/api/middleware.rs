//! Request quota and access logging.

use crate::error::ServiceError;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::{num::NonZeroU32, sync::Arc, time::Instant};
use tracing::{info, warn};

/// Process-wide request budget for the delivery and OTP routes.
///
/// One bucket is shared by every caller; it is not keyed by address.
#[derive(Clone)]
pub struct RequestQuota {
    limiter: Arc<DefaultDirectRateLimiter>,
    per_minute: NonZeroU32,
}

impl RequestQuota {
    /// Budget of `per_minute` requests, or `None` for zero (no quota).
    pub fn per_minute(per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(per_minute)?;

        Some(Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
            per_minute,
        })
    }

    fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

/// Reject with 429 once the quota for the current minute is spent.
pub async fn enforce_quota(
    State(quota): State<RequestQuota>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    if !quota.try_acquire() {
        warn!(
            path = %request.uri().path(),
            per_minute = quota.per_minute.get(),
            "Request quota exhausted"
        );
        return Err(ServiceError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

/// One log line per request, labelled with the matched route template.
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_client_error() || status.is_server_error() {
        warn!(%method, %route, status = status.as_u16(), elapsed_ms, "Request rejected");
    } else {
        info!(%method, %route, status = status.as_u16(), elapsed_ms, "Request served");
    }

    response
}
