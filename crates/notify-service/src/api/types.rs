//! API request and response types.

use notify_gateway::Channel;
use serde::{Deserialize, Serialize};

/// Request to issue an OTP.
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    #[serde(alias = "phoneNumber")]
    pub phone_number: String,
}

/// Request to check a submitted OTP.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(alias = "phoneNumber")]
    pub phone_number: String,

    #[serde(alias = "otp")]
    pub code: String,
}

/// Response for both OTP operations.
#[derive(Debug, Serialize)]
pub struct OtpResponse {
    pub phone_number: String,
    pub message: String,
}

/// Request to send an SMS or WhatsApp message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(alias = "To")]
    pub to: String,

    #[serde(alias = "Body")]
    pub body: String,
}

/// Response after handing a message to the provider.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub to: String,
    pub channel: Channel,
    pub message_id: String,
    pub status: String,
}

/// Request to send an email.
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(alias = "toEmail", alias = "ToEmail")]
    pub to_email: String,

    #[serde(alias = "Subject")]
    pub subject: String,

    #[serde(default, alias = "plainTextContent", alias = "PlainTextContent")]
    pub plain_text_content: String,

    #[serde(default, alias = "htmlContent", alias = "HtmlContent")]
    pub html_content: String,
}

/// Response after handing an email to the provider.
#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub to: String,
    pub message_id: Option<String>,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub otp_records: usize,
    pub twilio_api_healthy: bool,
}
