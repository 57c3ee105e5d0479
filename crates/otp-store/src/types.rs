//! Stored OTP record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Prefix namespacing OTP keys from anything else sharing the backend.
pub const KEY_PREFIX: &str = "OTP_";

/// Store key for a phone number.
pub fn otp_key(phone_number: &str) -> String {
    format!("{}{}", KEY_PREFIX, phone_number)
}

/// Hash a code using SHA-256.
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// The last code issued to a phone number.
///
/// Only the SHA-256 digest of the code is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Phone number in E.164 format
    pub phone_number: String,

    /// Hex SHA-256 of the issued code
    pub code_hash: String,

    /// When the code was issued
    pub issued_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Create a record for a freshly issued code.
    pub fn new(phone_number: impl Into<String>, code: &str) -> Self {
        Self {
            phone_number: phone_number.into(),
            code_hash: hash_code(code),
            issued_at: Utc::now(),
        }
    }

    /// Exact, case-sensitive comparison against the issued code.
    pub fn matches(&self, code: &str) -> bool {
        hash_code(code) == self.code_hash
    }
}
