//! Cache store collaborators
//!
//! The descriptor cache talks to any store exposing a TTL-scoped
//! get-or-compute. The sled-backed store is the default for real runs; the
//! in-memory store exists for tests and callers who inject their own cache.
//! The TTL clock starts at write time: each entry records when it was written
//! and with which TTL, and freshness is judged against that record.

use crate::error::CacheError;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, trace};

/// Future producing the bytes to cache on a miss.
pub type ComputeFuture<'a> = BoxFuture<'a, Result<Vec<u8>, CacheError>>;

/// Freshness report for one cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryStatus {
    /// Unix timestamp (seconds) of the write that produced the entry.
    pub written_at: i64,
    /// TTL the entry was written with, in seconds.
    pub ttl_secs: u64,
    /// Entry age in seconds at the time of the query.
    pub age_secs: u64,
    pub fresh: bool,
}

/// Cache store collaborator.
///
/// `get_or_compute` must return the stored value unchanged until its TTL
/// elapses, and store the computed value with the given TTL on a miss.
/// Cross-process atomicity is the implementation's contract; in-process
/// single-flight is enforced by the descriptor cache on top of this trait.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_or_compute(
        &self,
        key: &str,
        ttl: Duration,
        compute: ComputeFuture<'_>,
    ) -> Result<Vec<u8>, CacheError>;

    /// Drop an entry. Returns true if one existed.
    fn invalidate(&self, key: &str) -> Result<bool, CacheError>;

    /// Report an entry's freshness without touching it.
    fn entry_status(&self, key: &str) -> Result<Option<CacheEntryStatus>, CacheError>;
}

/// Stored representation of one cache entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    /// Unix timestamp (seconds) at write time.
    written_at: i64,
    /// TTL recorded at write time, in seconds.
    ttl_secs: u64,
    payload: Vec<u8>,
}

impl CacheEntry {
    fn new(payload: Vec<u8>, ttl: Duration) -> Self {
        Self {
            written_at: Utc::now().timestamp(),
            ttl_secs: ttl.as_secs(),
            payload,
        }
    }

    fn is_fresh(&self) -> bool {
        let age = Utc::now().timestamp().saturating_sub(self.written_at);
        age >= 0 && (age as u64) < self.ttl_secs
    }

    fn status(&self) -> CacheEntryStatus {
        let age = Utc::now().timestamp().saturating_sub(self.written_at).max(0) as u64;
        CacheEntryStatus {
            written_at: self.written_at,
            ttl_secs: self.ttl_secs,
            age_secs: age,
            fresh: self.is_fresh(),
        }
    }
}

/// Sled-backed cache store, the default for real runs.
pub struct SledCacheStore {
    db: sled::Db,
}

impl SledCacheStore {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let db = sled::open(path)
            .map_err(|e| CacheError::Store(format!("Failed to open sled database: {}", e)))?;
        Ok(Self { db })
    }

    fn read_entry(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| CacheError::Store(format!("Failed to read cache entry: {}", e)))?;
        match value {
            Some(bytes) => {
                let entry: CacheEntry = bincode::deserialize(&bytes).map_err(|e| {
                    CacheError::Store(format!("Failed to deserialize cache entry: {}", e))
                })?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    fn write_entry(&self, key: &str, entry: &CacheEntry) -> Result<(), CacheError> {
        let bytes = bincode::serialize(entry)
            .map_err(|e| CacheError::Store(format!("Failed to serialize cache entry: {}", e)))?;
        self.db
            .insert(key.as_bytes(), bytes)
            .map_err(|e| CacheError::Store(format!("Failed to write cache entry: {}", e)))?;
        self.db
            .flush()
            .map_err(|e| CacheError::Store(format!("Failed to flush cache store: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for SledCacheStore {
    async fn get_or_compute(
        &self,
        key: &str,
        ttl: Duration,
        compute: ComputeFuture<'_>,
    ) -> Result<Vec<u8>, CacheError> {
        if let Some(entry) = self.read_entry(key)? {
            if entry.is_fresh() {
                trace!(key, "Cache hit");
                return Ok(entry.payload);
            }
            debug!(key, "Cache entry expired");
        }

        debug!(key, ttl_secs = ttl.as_secs(), "Cache miss, computing");
        let payload = compute.await?;
        self.write_entry(key, &CacheEntry::new(payload.clone(), ttl))?;
        Ok(payload)
    }

    fn invalidate(&self, key: &str) -> Result<bool, CacheError> {
        let removed = self
            .db
            .remove(key.as_bytes())
            .map_err(|e| CacheError::Store(format!("Failed to remove cache entry: {}", e)))?;
        self.db
            .flush()
            .map_err(|e| CacheError::Store(format!("Failed to flush cache store: {}", e)))?;
        Ok(removed.is_some())
    }

    fn entry_status(&self, key: &str) -> Result<Option<CacheEntryStatus>, CacheError> {
        Ok(self.read_entry(key)?.map(|e| e.status()))
    }
}

/// In-memory cache store for tests and caller-supplied injection.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_or_compute(
        &self,
        key: &str,
        ttl: Duration,
        compute: ComputeFuture<'_>,
    ) -> Result<Vec<u8>, CacheError> {
        if let Some(entry) = self.entries.lock().get(key) {
            if entry.is_fresh() {
                return Ok(entry.payload.clone());
            }
        }

        let payload = compute.await?;
        self.entries
            .lock()
            .insert(key.to_string(), CacheEntry::new(payload.clone(), ttl));
        Ok(payload)
    }

    fn invalidate(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.lock().remove(key).is_some())
    }

    fn entry_status(&self, key: &str) -> Result<Option<CacheEntryStatus>, CacheError> {
        Ok(self.entries.lock().get(key).map(|e| e.status()))
    }
}
