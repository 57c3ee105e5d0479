//! Notification relay: SMS, WhatsApp and email delivery over HTTP, plus
//! one-time-password issuance and verification.
//!
//! - SMS/WhatsApp go out through Twilio, email through SendGrid
//! - OTP codes are delivered by SMS and kept, hashed, in an expiring store

pub mod api;
pub mod config;
pub mod error;
pub mod otp;
pub mod phone;

pub use config::Config;
pub use error::ServiceError;
pub use otp::OtpService;
