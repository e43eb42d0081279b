//! Error types for the SDK maker pipeline.

use thiserror::Error;

/// Cache-store and transport level errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache store error: {0}")]
    Store(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Cache I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Emitter-level errors
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to render class \"{class}\": {reason}")]
    Render { class: String, reason: String },

    #[error("Emitter I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Run-level errors surfaced from `Maker::make`
#[derive(Debug, Error)]
pub enum MakerError {
    #[error("Descriptor fetch failed: {0}")]
    Fetch(String),

    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("Class definition \"{0}\" not found")]
    ClassNotFound(String),

    #[error("Duplicate method \"{method}\" in class \"{class}\" (procedures \"{existing}\" and \"{incoming}\")")]
    DuplicateMethod {
        class: String,
        method: String,
        existing: String,
        incoming: String,
    },

    #[error("Can't remove previous version for class \"{fqn}\": {reason}")]
    Replacement { fqn: String, reason: String },

    #[error("Artifact registry error: {0}")]
    Registry(String),

    #[error("Emit failed: {0}")]
    Emit(#[from] EmitError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for MakerError {
    fn from(err: config::ConfigError) -> Self {
        MakerError::Config(err.to_string())
    }
}
