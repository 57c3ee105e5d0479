//! SendGrid v3 Mail Send client.

use crate::error::GatewayError;
use crate::gateway::EmailGateway;
use crate::types::*;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// SendGrid client for transactional email.
#[derive(Clone)]
pub struct SendGridClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    from: EmailAddress,
}

impl SendGridClient {
    /// Create a new SendGrid client sending from the given identity.
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        from_email: impl Into<String>,
        from_name: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            from: EmailAddress {
                email: from_email.into(),
                name: from_name,
            },
        })
    }

    /// Build the v3 request body for a single-recipient email.
    ///
    /// Empty content parts are left out; SendGrid requires `text/plain`
    /// to come before `text/html`.
    pub fn build_mail(&self, message: &EmailMessage) -> Result<SendGridMail, GatewayError> {
        if message.to.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("Recipient is required".into()));
        }

        let mut content = Vec::with_capacity(2);
        if !message.plain_text.is_empty() {
            content.push(MailContent {
                content_type: "text/plain".into(),
                value: message.plain_text.clone(),
            });
        }
        if !message.html.is_empty() {
            content.push(MailContent {
                content_type: "text/html".into(),
                value: message.html.clone(),
            });
        }
        if content.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "Email needs plain text or HTML content".into(),
            ));
        }

        Ok(SendGridMail {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: message.to.clone(),
                    name: None,
                }],
            }],
            from: self.from.clone(),
            subject: message.subject.clone(),
            content,
        })
    }

    /// Send an email.
    #[instrument(skip(self, message), fields(to = %message.to))]
    pub async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, GatewayError> {
        let mail = self.build_mail(message)?;

        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&mail)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = %status, "SendGrid rejected API key");
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<SendGridErrorBody>(&body)
                .ok()
                .and_then(|b| b.errors.into_iter().find_map(|e| e.message))
                .unwrap_or(body);
            warn!(status = %status, message = %message, "SendGrid request failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        debug!(?message_id, "Email accepted by SendGrid");
        Ok(EmailReceipt { message_id })
    }
}

#[async_trait]
impl EmailGateway for SendGridClient {
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, GatewayError> {
        SendGridClient::send_email(self, message).await
    }
}
