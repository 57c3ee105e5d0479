//! OTP store errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("OTP store unavailable: {0}")]
    Unavailable(String),
}
