//! Provider-agnostic delivery traits.

use crate::error::GatewayError;
use crate::types::{Channel, DeliveryReceipt, EmailMessage, EmailReceipt};
use async_trait::async_trait;

/// Outbound text messaging (SMS, WhatsApp).
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Hand a message to the provider. Success means the provider accepted it
    /// and assigned a message id, not that the handset received it.
    async fn send_message(
        &self,
        channel: Channel,
        to: &str,
        body: &str,
    ) -> Result<DeliveryReceipt, GatewayError>;

    /// Whether the provider is reachable with the configured credentials.
    async fn health_check(&self) -> bool {
        true
    }
}

/// Outbound transactional email.
#[async_trait]
pub trait EmailGateway: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, GatewayError>;
}
