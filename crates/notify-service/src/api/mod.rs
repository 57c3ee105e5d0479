//! HTTP API for the notification service.

mod extract;
mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::RequestQuota;
pub use types::*;

use crate::otp::OtpService;
use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use middleware::{access_log, enforce_quota};
use notify_gateway::{EmailGateway, MessageGateway};
use otp_store::OtpStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// SMS/WhatsApp provider
    pub messages: Arc<dyn MessageGateway>,
    /// Email provider
    pub email: Arc<dyn EmailGateway>,
    /// Issued OTP storage
    pub store: Arc<dyn OtpStore>,
    /// OTP issuance and verification
    pub otp: Arc<OtpService>,
}

impl AppState {
    /// Create new application state. The OTP flow delivers through
    /// `messages` and records codes in `store`.
    pub fn new(
        messages: Arc<dyn MessageGateway>,
        email: Arc<dyn EmailGateway>,
        store: Arc<dyn OtpStore>,
        single_use_otp: bool,
    ) -> Self {
        let otp = OtpService::new(messages.clone(), store.clone()).with_single_use(single_use_otp);

        Self {
            messages,
            email,
            store,
            otp: Arc::new(otp),
        }
    }
}

/// Create the API router.
///
/// `quota` throttles the delivery and OTP routes; `/health` is never
/// throttled.
pub fn create_router(state: AppState, quota: Option<RequestQuota>) -> Router {
    let mut api = Router::new()
        // OTP
        .route("/api/otp/send-otp", post(handlers::send_otp))
        .route("/api/otp/verify-otp", post(handlers::verify_otp))
        // Twilio messaging; the misspelled path is kept for existing callers
        .route("/api/twilio/send-sms", post(handlers::send_sms))
        .route("/api/Twillio/send-sms", post(handlers::send_sms))
        .route("/api/twilio/send-whatsapp-sms", post(handlers::send_whatsapp))
        // SendGrid email
        .route("/api/sendgrid/send-email", post(handlers::send_email));

    if let Some(quota) = quota {
        api = api.layer(axum_middleware::from_fn_with_state(quota, enforce_quota));
    }

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .layer(axum_middleware::from_fn(access_log))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
