//! Twilio Messages API client.

use crate::error::GatewayError;
use crate::gateway::MessageGateway;
use crate::types::*;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Twilio REST API client for outbound SMS and WhatsApp messages.
///
/// The auth token is stored using `SecretString` to keep it out of
/// logs and debug output.
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: SecretString,
    from_number: String,
    whatsapp_from: Option<String>,
}

impl TwilioClient {
    /// Create a new Twilio client.
    pub fn new(
        base_url: impl Into<String>,
        account_sid: impl Into<String>,
        auth_token: SecretString,
        from_number: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_sid: account_sid.into(),
            auth_token,
            from_number: from_number.into(),
            whatsapp_from: None,
        })
    }

    /// Use a dedicated sender number for WhatsApp messages.
    pub fn with_whatsapp_from(mut self, number: impl Into<String>) -> Self {
        self.whatsapp_from = Some(number.into());
        self
    }

    fn account_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}",
            self.base_url,
            encode(&self.account_sid)
        )
    }

    fn sender(&self, channel: Channel) -> &str {
        match channel {
            Channel::Sms => &self.from_number,
            Channel::WhatsApp => self.whatsapp_from.as_deref().unwrap_or(&self.from_number),
        }
    }

    /// Check that the account credentials are accepted by Twilio.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}.json", self.account_url()))
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Create a message resource, handing the message to Twilio for delivery.
    #[instrument(skip(self, body))]
    pub async fn send_message(
        &self,
        channel: Channel,
        to: &str,
        body: &str,
    ) -> Result<DeliveryReceipt, GatewayError> {
        if to.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("Recipient is required".into()));
        }

        let params = [
            ("To", channel.address(to)),
            ("From", channel.address(self.sender(channel))),
            ("Body", body.to_string()),
        ];

        let response = self
            .client
            .post(format!("{}/Messages.json", self.account_url()))
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&params)
            .send()
            .await?;

        let message: TwilioMessage = self.handle_response(response).await?;

        if message.sid.is_empty() {
            warn!("Twilio response carried no message SID");
            return Err(GatewayError::EmptyMessageId);
        }

        if let Some(code) = message.error_code {
            warn!(
                sid = %message.sid,
                error_code = code,
                error_message = message.error_message.as_deref().unwrap_or_default(),
                "Twilio flagged the message at creation"
            );
        }

        debug!(sid = %message.sid, "Message accepted by Twilio");

        Ok(DeliveryReceipt {
            message_id: message.sid,
            status: message.status.unwrap_or_else(|| "queued".into()),
        })
    }

    async fn handle_response(&self, response: Response) -> Result<TwilioMessage, GatewayError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Twilio rejected credentials");
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TwilioErrorBody>(&body) {
                Ok(TwilioErrorBody {
                    code: Some(code),
                    message: Some(message),
                }) => format!("{} (Twilio error {})", message, code),
                Ok(TwilioErrorBody {
                    message: Some(message),
                    ..
                }) => message,
                _ => body,
            };
            warn!(status = %status, message = %message, "Twilio request failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MessageGateway for TwilioClient {
    async fn send_message(
        &self,
        channel: Channel,
        to: &str,
        body: &str,
    ) -> Result<DeliveryReceipt, GatewayError> {
        TwilioClient::send_message(self, channel, to, body).await
    }

    async fn health_check(&self) -> bool {
        TwilioClient::health_check(self).await
    }
}
