//! Provider request and response types.

use serde::{Deserialize, Serialize};

/// Messaging channel for Twilio deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    WhatsApp,
}

impl Channel {
    /// Format a phone number as a Twilio address for this channel.
    pub fn address(&self, phone_number: &str) -> String {
        match self {
            Channel::Sms => phone_number.to_string(),
            Channel::WhatsApp => format!("whatsapp:{}", phone_number),
        }
    }
}

/// Result of a successful message hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// Twilio message SID
    pub message_id: String,
    /// Status reported at creation time (e.g. "queued")
    pub status: String,
}

/// Outgoing transactional email.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub plain_text: String,
    pub html: String,
}

/// Result of a successful email hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailReceipt {
    /// SendGrid `X-Message-Id`, when the response carried one
    pub message_id: Option<String>,
}

/// Twilio message resource, as returned by the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioMessage {
    #[serde(default)]
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Twilio error body.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// SendGrid v3 mail send request.
#[derive(Debug, Clone, Serialize)]
pub struct SendGridMail {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    pub subject: String,
    pub content: Vec<MailContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Personalization {
    pub to: Vec<EmailAddress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MailContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

/// SendGrid error body.
#[derive(Debug, Clone, Deserialize)]
pub struct SendGridErrorBody {
    #[serde(default)]
    pub errors: Vec<SendGridErrorItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendGridErrorItem {
    pub message: Option<String>,
    pub field: Option<String>,
}
