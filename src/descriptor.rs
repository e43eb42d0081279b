//! Descriptor retrieval and caching
//!
//! Fetches the remote procedure catalog and memoizes it for a configurable
//! TTL keyed by vendor alias. The transport and the cache store are injected
//! collaborators; this module owns the cache key scheme, the in-process
//! single-flight guarantee, and payload decoding.

use crate::error::{CacheError, MakerError};
use crate::store::{CacheEntryStatus, CacheStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Raw procedure catalog as fetched from the remote service.
///
/// Decoded with insertion order preserved: iteration order over procedures is
/// exactly the descriptor's own order, which downstream determinism relies on.
#[derive(Debug, Clone)]
pub struct RawDescriptor {
    document: Value,
}

impl RawDescriptor {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// The procedure table, read from `services` or, failing that,
    /// `procedures`. Missing both is a malformed descriptor.
    pub fn procedures(&self) -> Result<&Map<String, Value>, MakerError> {
        for key in ["services", "procedures"] {
            if let Some(value) = self.document.get(key) {
                return value.as_object().ok_or_else(|| {
                    MakerError::MalformedDescriptor(format!(
                        "top-level \"{}\" is not an object",
                        key
                    ))
                });
            }
        }
        Err(MakerError::MalformedDescriptor(
            "descriptor has neither a \"services\" nor a \"procedures\" top-level key".to_string(),
        ))
    }
}

/// Transport collaborator: retrieves the raw descriptor payload.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    async fn fetch_raw(
        &self,
        endpoint: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Vec<u8>, CacheError>;
}

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP GET transport, the default descriptor source.
pub struct HttpDescriptorSource {
    client: Client,
}

impl HttpDescriptorSource {
    pub fn new() -> Result<Self, CacheError> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CacheError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

fn map_http_error(error: reqwest::Error) -> CacheError {
    if error.is_timeout() {
        CacheError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        CacheError::Transport(format!("Connection error: {}", error))
    } else if error.is_status() {
        CacheError::Transport(format!("Request failed: {}", error))
    } else {
        CacheError::Transport(format!("HTTP error: {}", error))
    }
}

#[async_trait]
impl DescriptorSource for HttpDescriptorSource {
    async fn fetch_raw(
        &self,
        endpoint: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Vec<u8>, CacheError> {
        debug!(endpoint, "Fetching descriptor");
        let mut request = self.client.get(endpoint);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;

        let bytes = response.bytes().await.map_err(map_http_error)?;
        Ok(bytes.to_vec())
    }
}

/// Canned descriptor source for tests and offline runs.
pub struct MockDescriptorSource {
    payload: Vec<u8>,
    fetch_count: std::sync::atomic::AtomicUsize,
}

impl MockDescriptorSource {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            fetch_count: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of `fetch_raw` calls observed so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl DescriptorSource for MockDescriptorSource {
    async fn fetch_raw(
        &self,
        _endpoint: &str,
        _headers: &HashMap<String, String>,
    ) -> Result<Vec<u8>, CacheError> {
        self.fetch_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

/// Descriptor cache: TTL-memoized retrieval keyed by vendor alias.
pub struct DescriptorCache {
    endpoint: String,
    headers: HashMap<String, String>,
    ttl: Duration,
    source: Arc<dyn DescriptorSource>,
    store: Arc<dyn CacheStore>,
    /// Per-key gates: at most one in-flight fetch per cache key within this
    /// process. Cross-process races are the store's concern.
    inflight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl DescriptorCache {
    pub fn new(
        endpoint: String,
        headers: HashMap<String, String>,
        ttl: Duration,
        source: Arc<dyn DescriptorSource>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            endpoint,
            headers,
            ttl,
            source,
            store,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Cache key for a vendor alias. Incorporating the alias keeps multiple
    /// APIs sharing one cache store from colliding.
    pub fn cache_key(vendor_alias: &str) -> String {
        format!("rpc.descriptor.{}", vendor_alias)
    }

    fn key_gate(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.inflight
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Fetch the descriptor for a vendor, honoring the TTL window.
    pub async fn fetch(&self, vendor_alias: &str) -> Result<RawDescriptor, MakerError> {
        let key = Self::cache_key(vendor_alias);
        let gate = self.key_gate(&key);
        let _guard = gate.lock().await;

        let endpoint = self.endpoint.clone();
        let headers = self.headers.clone();
        let source = self.source.clone();
        let bytes = self
            .store
            .get_or_compute(
                &key,
                self.ttl,
                Box::pin(async move { source.fetch_raw(&endpoint, &headers).await }),
            )
            .await
            .map_err(|e| MakerError::Fetch(e.to_string()))?;

        let document: Value = serde_json::from_slice(&bytes).map_err(|e| {
            MakerError::Fetch(format!("descriptor payload is not valid JSON: {}", e))
        })?;
        info!(vendor_alias, "Descriptor ready");
        Ok(RawDescriptor::new(document))
    }

    /// Drop the cached descriptor for a vendor. Returns true if an entry
    /// existed.
    pub fn invalidate(&self, vendor_alias: &str) -> Result<bool, MakerError> {
        let key = Self::cache_key(vendor_alias);
        let removed = self.store.invalidate(&key)?;
        if removed {
            info!(vendor_alias, "Cached descriptor cleared");
        }
        Ok(removed)
    }

    /// Freshness report for the vendor's cached descriptor.
    pub fn status(&self, vendor_alias: &str) -> Result<Option<CacheEntryStatus>, MakerError> {
        let key = Self::cache_key(vendor_alias);
        Ok(self.store.entry_status(&key)?)
    }
}
