//! Artifact registry
//!
//! Persistent index of previously generated artifacts: fully-qualified class
//! name → file path. The regeneration coordinator queries it before emitting
//! a class and records every emitter result in it, so the next run knows
//! exactly which file to replace. Persisted as JSON next to the output
//! directory, written atomically (temp file + rename).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const REGISTRY_VERSION: u32 = 1;

/// On-disk format.
#[derive(Debug, Serialize, Deserialize)]
struct RegistryPersistence {
    version: u32,
    artifacts: IndexMap<String, PathBuf>,
}

/// FQN → artifact path index.
pub struct ArtifactRegistry {
    path: PathBuf,
    artifacts: IndexMap<String, PathBuf>,
}

impl ArtifactRegistry {
    /// Default registry location for an output directory.
    pub fn registry_path(out_dir: &Path) -> PathBuf {
        out_dir.join(".artifacts.json")
    }

    /// Load the registry from disk. A missing file yields an empty registry;
    /// a corrupt or wrong-version file is an error.
    pub fn load(path: PathBuf) -> Result<Self, io::Error> {
        if !path.exists() {
            return Ok(Self {
                path,
                artifacts: IndexMap::new(),
            });
        }

        let bytes = fs::read(&path)?;
        let persistence: RegistryPersistence = serde_json::from_slice(&bytes).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to parse artifact registry {:?}: {}", path, e),
            )
        })?;
        if persistence.version != REGISTRY_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Unsupported artifact registry version: {} (expected {})",
                    persistence.version, REGISTRY_VERSION
                ),
            ));
        }

        Ok(Self {
            path,
            artifacts: persistence.artifacts,
        })
    }

    /// Save the registry atomically (temp file + rename).
    pub fn save(&self) -> Result<(), io::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let persistence = RegistryPersistence {
            version: REGISTRY_VERSION,
            artifacts: self.artifacts.clone(),
        };
        let serialized = serde_json::to_vec_pretty(&persistence).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to serialize artifact registry: {}", e),
            )
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &serialized)?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            e
        })?;
        debug!(path = %self.path.display(), entries = self.artifacts.len(), "Artifact registry saved");
        Ok(())
    }

    /// Path of the previously generated artifact for a fully-qualified class
    /// name, if one is recorded.
    pub fn resolve(&self, fqn: &str) -> Option<&Path> {
        self.artifacts.get(fqn).map(PathBuf::as_path)
    }

    /// Record the artifact emitted for a class.
    pub fn record(&mut self, fqn: String, path: PathBuf) {
        self.artifacts.insert(fqn, path);
    }

    /// Drop a class from the index. Returns true if it was recorded.
    pub fn forget(&mut self, fqn: &str) -> bool {
        self.artifacts.shift_remove(fqn).is_some()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.artifacts.iter()
    }
}
