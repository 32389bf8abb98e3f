//! Timestamped cache over the key/value store.
//!
//! Each namespace holds one JSON record `{ ts, data }` replaced wholesale on
//! every write. Expiry is lazy: a stale record simply reads as absent, and
//! nothing ever sweeps the store. Every failure mode (missing key, parse
//! error, storage error) degrades to a cold cache.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use nightfall_core::CatalogEntry;

use crate::kv::KeyValueStore;

/// Remote lists are refetched after this long.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Serialize, Deserialize)]
struct CacheRecord {
    ts: i64,
    data: Vec<CatalogEntry>,
}

/// TTL-gated catalog cache. Cheap to clone; shares the underlying store.
#[derive(Clone)]
pub struct TtlCache {
    store: Arc<dyn KeyValueStore>,
}

impl TtlCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read a namespace, treating anything older than `ttl` as absent.
    pub async fn read(&self, namespace: &str, ttl: Duration) -> Option<Vec<CatalogEntry>> {
        self.read_at(namespace, ttl, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// `read` with an explicit clock, for TTL boundary tests.
    pub async fn read_at(
        &self,
        namespace: &str,
        ttl: Duration,
        now_ms: i64,
    ) -> Option<Vec<CatalogEntry>> {
        let raw = match self.store.get(namespace).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(namespace, error = %e, "cache read failed, treating as cold");
                return None;
            }
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(r) => r,
            Err(e) => {
                debug!(namespace, error = %e, "cache record malformed, treating as cold");
                return None;
            }
        };

        if record.ts <= 0 || now_ms - record.ts > ttl.as_millis() as i64 {
            debug!(namespace, ts = record.ts, "cache record expired");
            return None;
        }

        Some(record.data)
    }

    /// Replace a namespace's payload. Storage failures are swallowed; the
    /// next session just starts cold.
    pub async fn write(&self, namespace: &str, data: &[CatalogEntry]) {
        self.write_at(namespace, data, chrono::Utc::now().timestamp_millis())
            .await
    }

    async fn write_at(&self, namespace: &str, data: &[CatalogEntry], now_ms: i64) {
        let record = CacheRecord {
            ts: now_ms,
            data: data.to_vec(),
        };
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(namespace, error = %e, "cache serialize failed, skipping write");
                return;
            }
        };
        if let Err(e) = self.store.set(namespace, &raw).await {
            debug!(namespace, error = %e, "cache write failed, skipping");
        }
    }
}
