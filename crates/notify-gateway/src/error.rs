//! Gateway errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication with provider failed")]
    Unauthorized,

    #[error("Provider error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Provider accepted the request but returned no message id")]
    EmptyMessageId,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
