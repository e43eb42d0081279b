//! Configuration System
//!
//! Declarative configuration for the SDK maker: endpoint, vendor alias,
//! namespace, cache TTL, and output locations. Values merge in priority
//! order: built-in defaults, then the project's `sdkgen.toml`, then an
//! explicitly named config file; CLI flags override all of these in the
//! binary.

use crate::error::MakerError;
use crate::logging::LoggingConfig;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default namespace generated classes live under.
pub const DEFAULT_NAMESPACE: &str = "sdk.client";

/// Default descriptor cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Project config file name, looked up at the project root.
pub const PROJECT_CONFIG_FILE: &str = "sdkgen.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakerConfig {
    /// Remote API endpoint serving the procedure catalog.
    #[serde(default)]
    pub endpoint: String,

    /// Vendor alias override. Derived from the endpoint host when absent.
    #[serde(default)]
    pub vendor_alias: Option<String>,

    /// Extra request headers for the descriptor fetch.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Target namespace for generated classes.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Project root directory.
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Descriptor cache TTL in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Output directory for generated modules, relative to the project root
    /// unless absolute.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("generated")
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            vendor_alias: None,
            headers: HashMap::new(),
            namespace: default_namespace(),
            project_root: default_project_root(),
            cache_ttl_secs: default_cache_ttl(),
            out_dir: default_out_dir(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MakerConfig {
    /// Validate the configuration. An endpoint is required and must be a
    /// parseable URL with a host (the host seeds the vendor alias).
    pub fn validate(&self) -> Result<(), MakerError> {
        if self.endpoint.trim().is_empty() {
            return Err(MakerError::Config(
                "API endpoint is required (set `endpoint` in sdkgen.toml or pass --endpoint)"
                    .to_string(),
            ));
        }
        let url = reqwest::Url::parse(self.endpoint.trim())
            .map_err(|e| MakerError::Config(format!("Invalid endpoint URL: {}", e)))?;
        if url.host_str().is_none() {
            return Err(MakerError::Config(format!(
                "Endpoint URL has no host: {}",
                self.endpoint
            )));
        }

        if self.namespace.trim().is_empty() {
            return Err(MakerError::Config("Namespace cannot be empty".to_string()));
        }
        if !self
            .namespace
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '_')
        {
            return Err(MakerError::Config(format!(
                "Namespace contains invalid characters: {}",
                self.namespace
            )));
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(MakerError::Config(
                "Output directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Output directory resolved against the project root.
    pub fn resolved_out_dir(&self) -> PathBuf {
        if self.out_dir.is_absolute() {
            self.out_dir.clone()
        } else {
            self.project_root.join(&self.out_dir)
        }
    }

    /// Location of the default sled-backed descriptor cache.
    pub fn cache_dir(&self) -> PathBuf {
        self.project_root.join(".sdkgen").join("cache")
    }
}

/// Loads configuration with merge policy applied.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project root: defaults, then the project's
    /// `sdkgen.toml` if present.
    pub fn load(project_root: &Path) -> Result<MakerConfig, MakerError> {
        let project_file = project_root.join(PROJECT_CONFIG_FILE);
        let mut builder = Self::builder_with_defaults()?;
        if project_file.exists() {
            debug!(path = %project_file.display(), "Loading project config");
            builder = builder.add_source(File::from(project_file).required(false));
        }

        let mut config: MakerConfig = builder.build()?.try_deserialize()?;
        config.project_root = project_root.to_path_buf();
        Ok(config)
    }

    /// Load configuration from an explicit file, bypassing project lookup.
    pub fn load_from_file(path: &Path) -> Result<MakerConfig, MakerError> {
        let builder = Self::builder_with_defaults()?.add_source(File::from(path.to_path_buf()));
        let config: MakerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    fn builder_with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, MakerError> {
        Ok(Config::builder()
            .set_default("endpoint", "")?
            .set_default("namespace", DEFAULT_NAMESPACE)?
            .set_default("project_root", ".")?
            .set_default("cache_ttl_secs", DEFAULT_CACHE_TTL_SECS as i64)?
            .set_default("out_dir", "generated")?)
    }
}
