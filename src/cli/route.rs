//! CLI route: single route table and run context. Dispatches to the maker
//! facade and formats results for the terminal.

use crate::cli::output::{format_cache_status, format_make_report};
use crate::cli::parse::{CacheCommands, Commands};
use crate::config::{ConfigLoader, MakerConfig};
use crate::error::MakerError;
use crate::maker::Maker;
use crate::model::ClassDefinition;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution.
/// Built from the project root and optional config path using ConfigLoader
/// only; per-command flags are layered on top at dispatch time.
pub struct RunContext {
    config: MakerConfig,
}

impl RunContext {
    /// Create run context from project root and optional config path.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, MakerError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&project_root)?
        };
        config.project_root = project_root;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    /// Execute a CLI command and return its terminal output.
    pub fn execute(&self, command: &Commands) -> Result<String, MakerError> {
        match command {
            Commands::Generate {
                endpoint,
                vendor,
                namespace,
                headers,
                ttl,
                out,
                refresh,
            } => {
                let mut config = self.config.clone();
                if let Some(endpoint) = endpoint {
                    config.endpoint = endpoint.clone();
                }
                if let Some(vendor) = vendor {
                    config.vendor_alias = Some(vendor.clone());
                }
                if let Some(namespace) = namespace {
                    config.namespace = namespace.clone();
                }
                for header in headers {
                    let (name, value) = parse_header(header)?;
                    config.headers.insert(name, value);
                }
                if let Some(ttl) = ttl {
                    config.cache_ttl_secs = *ttl;
                }
                if let Some(out) = out {
                    config.out_dir = out.clone();
                }

                let maker = Maker::new(config)?;
                if *refresh {
                    maker.clear_cached_descriptor()?;
                }

                let runtime = build_runtime()?;
                let mut observer = |class: &ClassDefinition| {
                    info!(fqn = %class.full_name(), "Class generated");
                };
                let report = runtime.block_on(maker.make(Some(&mut observer)))?;
                Ok(format_make_report(&report))
            }
            Commands::Cache { command } => {
                let maker = Maker::new(self.config.clone())?;
                match command {
                    CacheCommands::Clear => {
                        if maker.clear_cached_descriptor()? {
                            Ok(format!("Cleared cached descriptor {}", maker.cache_key()))
                        } else {
                            Ok(format!("No cached descriptor {}", maker.cache_key()))
                        }
                    }
                    CacheCommands::Status => {
                        let status = maker.cache_status()?;
                        Ok(format_cache_status(&maker.cache_key(), status.as_ref()))
                    }
                }
            }
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, MakerError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| MakerError::Config(format!("Failed to create async runtime: {}", e)))
}

/// Parse a `KEY=VALUE` header flag.
fn parse_header(raw: &str) -> Result<(String, String), MakerError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(MakerError::Config(format!(
            "Invalid header \"{}\" (expected KEY=VALUE)",
            raw
        ))),
    }
}
