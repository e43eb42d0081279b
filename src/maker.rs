//! Maker facade
//!
//! Wires the pipeline together: descriptor cache → model builder →
//! regeneration coordinator. `Maker::new` constructs the default
//! collaborators (HTTP transport, sled-backed cache, Rust module emitter);
//! `Maker::with_collaborators` accepts replacements for any of them.

use crate::builder::{pascal_case, ModelBuilder};
use crate::config::MakerConfig;
use crate::descriptor::{DescriptorCache, DescriptorSource, HttpDescriptorSource};
use crate::emit::{ClassEmitter, RustModuleEmitter};
use crate::error::MakerError;
use crate::regeneration::{regenerate, ClassObserver};
use crate::registry::ArtifactRegistry;
use crate::store::{CacheEntryStatus, CacheStore, SledCacheStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Summary of one `make` run.
#[derive(Debug, Clone)]
pub struct MakeReport {
    pub vendor_alias: String,
    /// Number of classes generated.
    pub class_count: usize,
    /// Number of previous artifacts removed before emission.
    pub removed_count: usize,
    /// Generated artifacts: (FQN, path), in emission order.
    pub classes: Vec<(String, PathBuf)>,
    pub duration_ms: u64,
}

/// Derive the vendor alias: an explicit override Pascal-cased, or the
/// endpoint URL host Pascal-cased per dot segment
/// (`api.example.com` → `ApiExampleCom`).
pub fn derive_vendor_alias(config: &MakerConfig) -> Result<String, MakerError> {
    let raw = match &config.vendor_alias {
        Some(alias) => alias.clone(),
        None => {
            let url = reqwest::Url::parse(config.endpoint.trim())
                .map_err(|e| MakerError::Config(format!("Invalid endpoint URL: {}", e)))?;
            url.host_str()
                .ok_or_else(|| {
                    MakerError::Config(format!("Endpoint URL has no host: {}", config.endpoint))
                })?
                .to_string()
        }
    };

    let alias = pascal_case(&raw);
    if alias.is_empty() {
        return Err(MakerError::Config(format!(
            "Vendor alias \"{}\" yields no usable identifier",
            raw
        )));
    }
    Ok(alias)
}

/// Top-level SDK maker.
pub struct Maker {
    config: MakerConfig,
    vendor_alias: String,
    cache: DescriptorCache,
    emitter: Box<dyn ClassEmitter>,
    registry_path: PathBuf,
}

impl Maker {
    /// Construct with the default collaborator stack.
    pub fn new(config: MakerConfig) -> Result<Self, MakerError> {
        config.validate()?;
        let vendor_alias = derive_vendor_alias(&config)?;
        let source: Arc<dyn DescriptorSource> = Arc::new(HttpDescriptorSource::new()?);
        let store: Arc<dyn CacheStore> = Arc::new(SledCacheStore::open(config.cache_dir())?);
        let emitter: Box<dyn ClassEmitter> = Box::new(RustModuleEmitter::new(
            config.resolved_out_dir(),
            vendor_alias.clone(),
        ));
        Self::with_collaborators(config, source, store, emitter)
    }

    /// Construct with injected collaborators.
    pub fn with_collaborators(
        config: MakerConfig,
        source: Arc<dyn DescriptorSource>,
        store: Arc<dyn CacheStore>,
        emitter: Box<dyn ClassEmitter>,
    ) -> Result<Self, MakerError> {
        config.validate()?;
        let vendor_alias = derive_vendor_alias(&config)?;
        let cache = DescriptorCache::new(
            config.endpoint.trim().to_string(),
            config.headers.clone(),
            Duration::from_secs(config.cache_ttl_secs),
            source,
            store,
        );
        let registry_path = ArtifactRegistry::registry_path(&config.resolved_out_dir());

        Ok(Self {
            config,
            vendor_alias,
            cache,
            emitter,
            registry_path,
        })
    }

    pub fn vendor_alias(&self) -> &str {
        &self.vendor_alias
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    /// Run the full pipeline: fetch → build → regenerate.
    ///
    /// The optional observer is notified once per class after the class has
    /// been fully replaced. All errors surface here; nothing is retried.
    pub async fn make(
        &self,
        observer: Option<ClassObserver<'_>>,
    ) -> Result<MakeReport, MakerError> {
        let start = Instant::now();
        info!(
            vendor_alias = %self.vendor_alias,
            endpoint = %self.config.endpoint,
            "SDK make starting"
        );

        let descriptor = self.cache.fetch(&self.vendor_alias).await?;
        let builder = ModelBuilder::new(self.config.namespace.clone(), self.vendor_alias.clone());
        let model = builder.build(&descriptor)?;

        let mut registry = ArtifactRegistry::load(self.registry_path.clone())
            .map_err(|e| MakerError::Registry(e.to_string()))?;
        let regen = regenerate(&model, &mut registry, self.emitter.as_ref(), observer)?;

        let report = MakeReport {
            vendor_alias: self.vendor_alias.clone(),
            class_count: regen.class_count,
            removed_count: regen.removed_count,
            classes: regen.emitted,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            class_count = report.class_count,
            removed_count = report.removed_count,
            duration_ms = report.duration_ms,
            "SDK make complete"
        );
        Ok(report)
    }

    /// Drop this vendor's cached descriptor so the next `make` refetches.
    /// Returns true if a cached entry existed.
    pub fn clear_cached_descriptor(&self) -> Result<bool, MakerError> {
        self.cache.invalidate(&self.vendor_alias)
    }

    /// Freshness report for this vendor's cached descriptor.
    pub fn cache_status(&self) -> Result<Option<CacheEntryStatus>, MakerError> {
        self.cache.status(&self.vendor_alias)
    }

    /// Cache key under which this vendor's descriptor is stored.
    pub fn cache_key(&self) -> String {
        DescriptorCache::cache_key(&self.vendor_alias)
    }
}
