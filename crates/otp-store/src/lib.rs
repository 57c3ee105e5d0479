//! Expiring storage for issued one-time passwords.
//!
//! Records are keyed by a namespaced phone number and hold only a digest of
//! the issued code. Entries expire a fixed TTL after they are written.

mod error;
mod store;
mod types;

pub use error::StoreError;
pub use store::{MemoryOtpStore, OtpStore};
pub use types::*;
