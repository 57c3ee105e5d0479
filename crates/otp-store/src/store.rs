//! OTP store contract and in-memory backend with TTL expiration.

use crate::error::StoreError;
use crate::types::OtpRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Keyed storage for issued codes.
///
/// Each operation is atomic on its own; nothing serializes a `put` against a
/// concurrent `get` for the same key, so the last writer wins.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Insert or overwrite the record under `key`.
    async fn put(&self, key: &str, record: OtpRecord) -> Result<(), StoreError>;

    /// Fetch the unexpired record under `key`.
    async fn get(&self, key: &str) -> Result<Option<OtpRecord>, StoreError>;

    /// Remove the record under `key`, returning whether one was present.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// Number of unexpired records.
    async fn len(&self) -> usize;
}

struct OtpEntry {
    record: OtpRecord,
    expires_at: Instant,
}

/// In-memory OTP store.
///
/// Records expire `ttl` after they are written; reads do not extend them.
/// A background task drops expired entries once a minute.
#[derive(Clone)]
pub struct MemoryOtpStore {
    entries: Arc<RwLock<HashMap<String, OtpEntry>>>,
    ttl: Duration,
}

impl MemoryOtpStore {
    /// Create a new in-memory store.
    ///
    /// Must be called from within a Tokio runtime: spawns the cleanup task.
    pub fn new(ttl: Duration) -> Self {
        let store = Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let cleanup_store = store.clone();
        tokio::spawn(async move {
            cleanup_store.cleanup_loop().await;
        });

        info!("In-memory OTP store initialized (ttl={:?})", ttl);

        store
    }

    async fn cleanup_loop(&self) {
        let cleanup_interval = Duration::from_secs(60);

        loop {
            tokio::time::sleep(cleanup_interval).await;
            let removed = self.purge_expired().await;
            if removed > 0 {
                debug!("Cleaned up {} expired OTP records", removed);
            }
        }
    }

    /// Drop every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    #[instrument(skip(self, record))]
    async fn put(&self, key: &str, record: OtpRecord) -> Result<(), StoreError> {
        let expires_at = Instant::now() + self.ttl;
        let mut entries = self.entries.write().await;
        let replaced = entries
            .insert(key.to_string(), OtpEntry { record, expires_at })
            .is_some();

        debug!(replaced, "Stored OTP record");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<OtpRecord>, StoreError> {
        let entries = self.entries.read().await;
        let now = Instant::now();

        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.record.clone()))
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(key).is_some())
    }

    async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        let now = Instant::now();
        entries.values().filter(|entry| entry.expires_at > now).count()
    }
}
