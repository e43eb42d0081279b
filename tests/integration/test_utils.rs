//! Shared test utilities for integration tests
//!
//! Builds makers wired with canned descriptor sources and in-memory cache
//! stores so pipeline tests run without network or a real sled database.

use sdkgen::config::MakerConfig;
use sdkgen::descriptor::MockDescriptorSource;
use sdkgen::emit::RustModuleEmitter;
use sdkgen::maker::{derive_vendor_alias, Maker};
use sdkgen::store::MemoryCacheStore;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// A small but representative catalog: two `user.*` procedures, one
/// `billing.*` procedure, and one dotless procedure.
pub fn sample_descriptor() -> Value {
    json!({
        "procedures": {
            "user.getById": {
                "returns": "User",
                "parameters": [
                    {"name": "id", "type": "int", "optional": false}
                ]
            },
            "user.find": {
                "returns": "UserList",
                "parameters": [
                    {"name": "name", "type": "string", "optional": false},
                    {"name": "limit", "type": "int", "optional": true, "default": 25}
                ]
            },
            "billing.invoice": {
                "returns": "Invoice",
                "parameters": [
                    {"name": "month", "type": "string", "optional": false}
                ]
            },
            "ping": {
                "returns": "string",
                "parameters": []
            }
        }
    })
}

pub fn test_config(project_root: &Path, ttl_secs: u64) -> MakerConfig {
    MakerConfig {
        endpoint: "https://api.example.com/rpc".to_string(),
        project_root: project_root.to_path_buf(),
        cache_ttl_secs: ttl_secs,
        ..MakerConfig::default()
    }
}

/// Maker wired with a canned source and an in-memory cache store; emission
/// goes to `<project_root>/generated`. Returns the source so tests can count
/// fetches.
pub fn test_maker(
    project_root: &Path,
    descriptor: Value,
    ttl_secs: u64,
) -> (Maker, Arc<MockDescriptorSource>) {
    let config = test_config(project_root, ttl_secs);
    let source = Arc::new(MockDescriptorSource::new(
        descriptor.to_string().into_bytes(),
    ));
    let alias = derive_vendor_alias(&config).unwrap();
    let emitter = Box::new(RustModuleEmitter::new(config.resolved_out_dir(), alias));
    let maker = Maker::with_collaborators(
        config,
        source.clone(),
        Arc::new(MemoryCacheStore::new()),
        emitter,
    )
    .unwrap();
    (maker, source)
}
