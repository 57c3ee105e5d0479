//! Delivery clients for third-party communication providers.
//!
//! - [`TwilioClient`]: SMS and WhatsApp through the Twilio Messages API
//! - [`SendGridClient`]: transactional email through SendGrid v3
//!
//! Both are exposed behind the [`MessageGateway`] and [`EmailGateway`]
//! traits so callers can swap in test doubles.

mod error;
mod gateway;
mod sendgrid;
mod twilio;
mod types;

pub use error::GatewayError;
pub use gateway::{EmailGateway, MessageGateway};
pub use sendgrid::SendGridClient;
pub use twilio::TwilioClient;
pub use types::*;
