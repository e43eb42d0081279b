//! CLI parse: clap types for sdkgen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sdkgen CLI - Generate RPC client SDK modules from a remote procedure catalog
#[derive(Parser)]
#[command(name = "sdkgen")]
#[command(about = "Generate RPC client SDK modules from a remote procedure catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root directory
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the procedure catalog and regenerate the client SDK
    Generate {
        /// API endpoint URL serving the procedure catalog
        #[arg(long)]
        endpoint: Option<String>,

        /// Vendor alias override (derived from the endpoint host by default)
        #[arg(long)]
        vendor: Option<String>,

        /// Target namespace for generated classes
        #[arg(long)]
        namespace: Option<String>,

        /// Extra request header as KEY=VALUE (repeatable)
        #[arg(long = "header")]
        headers: Vec<String>,

        /// Descriptor cache TTL in seconds
        #[arg(long)]
        ttl: Option<u64>,

        /// Output directory for generated modules
        #[arg(long)]
        out: Option<PathBuf>,

        /// Bypass the cached descriptor and refetch before generating
        #[arg(long)]
        refresh: bool,
    },
    /// Descriptor cache maintenance
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Drop the vendor's cached descriptor
    Clear,
    /// Report the cached descriptor's key, age, and freshness
    Status,
}
