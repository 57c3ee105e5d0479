//! HTTP request handlers.

use super::extract::{JsonBody, Params};
use super::types::{
    EmailResponse, HealthResponse, MessageResponse, OtpResponse, SendEmailRequest,
    SendMessageRequest, SendOtpRequest, VerifyOtpRequest,
};
use super::AppState;
use crate::error::ServiceError;
use crate::phone::normalize_phone_number;
use axum::{extract::State, Json};
use notify_gateway::{Channel, EmailMessage};
use tracing::{error, info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let otp_records = state.store.len().await;
    let twilio_healthy = state.messages.health_check().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        otp_records,
        twilio_api_healthy: twilio_healthy,
    })
}

/// Issue an OTP to a phone number given in the query string or JSON body.
pub async fn send_otp(
    State(state): State<AppState>,
    Params(request): Params<SendOtpRequest>,
) -> Result<Json<OtpResponse>, ServiceError> {
    let number =
        normalize_phone_number(&request.phone_number).map_err(ServiceError::InvalidPhoneNumber)?;
    info!(phone_number = %number, "OTP send request received");

    state.otp.send(&number).await.map_err(|e| {
        error!(phone_number = %number, error = %e, "Failed to send OTP");
        e
    })?;

    Ok(Json(OtpResponse {
        phone_number: number,
        message: "OTP sent successfully".to_string(),
    }))
}

/// Verify a submitted OTP.
pub async fn verify_otp(
    State(state): State<AppState>,
    Params(request): Params<VerifyOtpRequest>,
) -> Result<Json<OtpResponse>, ServiceError> {
    let number =
        normalize_phone_number(&request.phone_number).map_err(ServiceError::InvalidPhoneNumber)?;
    info!(phone_number = %number, "OTP verification request received");

    if !state.otp.verify(&number, &request.code).await {
        warn!(phone_number = %number, "OTP verification failed");
        return Err(ServiceError::OtpMismatch);
    }

    Ok(Json(OtpResponse {
        phone_number: number,
        message: "OTP verified successfully".to_string(),
    }))
}

/// Send an SMS message.
pub async fn send_sms(
    state: State<AppState>,
    request: JsonBody<SendMessageRequest>,
) -> Result<Json<MessageResponse>, ServiceError> {
    send_text(state, Channel::Sms, request).await
}

/// Send a WhatsApp message.
pub async fn send_whatsapp(
    state: State<AppState>,
    request: JsonBody<SendMessageRequest>,
) -> Result<Json<MessageResponse>, ServiceError> {
    send_text(state, Channel::WhatsApp, request).await
}

async fn send_text(
    State(state): State<AppState>,
    channel: Channel,
    JsonBody(request): JsonBody<SendMessageRequest>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let to = normalize_phone_number(&request.to).map_err(ServiceError::InvalidPhoneNumber)?;

    if request.body.trim().is_empty() {
        return Err(ServiceError::InvalidRequest("Message body is required".into()));
    }

    let receipt = state
        .messages
        .send_message(channel, &to, &request.body)
        .await
        .map_err(|e| {
            error!(to = %to, ?channel, error = %e, "Failed to send message");
            ServiceError::Delivery(e)
        })?;

    info!(to = %to, ?channel, message_id = %receipt.message_id, "Message sent successfully");

    Ok(Json(MessageResponse {
        to,
        channel,
        message_id: receipt.message_id,
        status: receipt.status,
    }))
}

/// Send a transactional email.
pub async fn send_email(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SendEmailRequest>,
) -> Result<Json<EmailResponse>, ServiceError> {
    let to = request.to_email.trim().to_string();
    if to.is_empty() || !to.contains('@') {
        return Err(ServiceError::InvalidRequest(
            "A valid recipient email address is required".into(),
        ));
    }

    let message = EmailMessage {
        to: to.clone(),
        subject: request.subject,
        plain_text: request.plain_text_content,
        html: request.html_content,
    };

    let receipt = state.email.send_email(&message).await.map_err(|e| {
        error!(to = %to, error = %e, "Failed to send email");
        ServiceError::Delivery(e)
    })?;

    info!(to = %to, "Email sent successfully");

    Ok(Json(EmailResponse {
        to,
        message_id: receipt.message_id,
        message: "Email sent successfully".to_string(),
    }))
}
