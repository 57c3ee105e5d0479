//! One-time password issuance and verification.

use crate::error::ServiceError;
use notify_gateway::{Channel, DeliveryReceipt, GatewayError, MessageGateway};
use otp_store::{otp_key, OtpRecord, OtpStore};
use rand::{rngs::OsRng, Rng};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Number of digits in an issued code.
pub const CODE_LENGTH: usize = 6;

/// Generate a numeric code, each digit drawn uniformly from `0..=9`.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Text delivered to the phone.
pub fn otp_message(code: &str) -> String {
    format!("Your OTP is: {}", code)
}

/// Issues codes over SMS and checks them against the store.
pub struct OtpService {
    gateway: Arc<dyn MessageGateway>,
    store: Arc<dyn OtpStore>,
    single_use: bool,
}

impl OtpService {
    /// Create a flow whose codes are discarded after a successful verify.
    pub fn new(gateway: Arc<dyn MessageGateway>, store: Arc<dyn OtpStore>) -> Self {
        Self {
            gateway,
            store,
            single_use: true,
        }
    }

    /// Keep codes valid after verification until they expire or are replaced.
    pub fn with_single_use(mut self, single_use: bool) -> Self {
        self.single_use = single_use;
        self
    }

    /// Generate a code, deliver it by SMS, and record it for `phone_number`.
    ///
    /// Nothing is stored unless the provider accepted the message and
    /// returned a message id. A new code replaces any earlier one. A store
    /// failure after delivery fails the send; the delivered code is unusable.
    #[instrument(skip(self))]
    pub async fn send(&self, phone_number: &str) -> Result<DeliveryReceipt, ServiceError> {
        let code = generate_code();

        let receipt = self
            .gateway
            .send_message(Channel::Sms, phone_number, &otp_message(&code))
            .await
            .map_err(|e| {
                warn!(error = %e, "OTP delivery failed");
                ServiceError::Delivery(e)
            })?;

        if receipt.message_id.is_empty() {
            warn!("OTP delivery returned no message id");
            return Err(ServiceError::Delivery(GatewayError::EmptyMessageId));
        }

        if let Err(e) = self
            .store
            .put(&otp_key(phone_number), OtpRecord::new(phone_number, &code))
            .await
        {
            warn!(
                message_id = %receipt.message_id,
                error = %e,
                "Delivered OTP could not be recorded"
            );
            return Err(ServiceError::OtpNotRecorded);
        }

        info!(message_id = %receipt.message_id, "OTP sent");
        Ok(receipt)
    }

    /// Check `code` against the last code issued to `phone_number`.
    ///
    /// `false` covers a missing (or expired) record, a mismatch, and an
    /// unreachable store.
    #[instrument(skip(self, code))]
    pub async fn verify(&self, phone_number: &str, code: &str) -> bool {
        let key = otp_key(phone_number);

        let record = match self.store.get(&key).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No OTP on record");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "OTP store unavailable during verification");
                return false;
            }
        };

        if !record.matches(code) {
            debug!("OTP mismatch");
            return false;
        }

        if self.single_use {
            if let Err(e) = self.store.remove(&key).await {
                warn!(error = %e, "Verified OTP could not be discarded");
            }
        }

        info!("OTP verified");
        true
    }
}
