//! Error types for the notification service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notify_gateway::GatewayError;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Service error types.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider rejected the message or could not be reached.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] GatewayError),

    #[error("Invalid OTP")]
    OtpMismatch,

    /// The code went out but could not be recorded, so it can never verify.
    #[error("OTP could not be recorded")]
    OtpNotRecorded,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl ServiceError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServiceError::InvalidPhoneNumber(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_PHONE_NUMBER")
            }
            ServiceError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServiceError::Delivery(_) => (StatusCode::BAD_REQUEST, "DELIVERY_FAILED"),
            ServiceError::OtpMismatch => (StatusCode::BAD_REQUEST, "INVALID_OTP"),
            ServiceError::OtpNotRecorded => (StatusCode::BAD_REQUEST, "OTP_NOT_RECORDED"),
            ServiceError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED")
            }
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        debug!(error = %self, code, status = status.as_u16(), "Rejecting request");

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
