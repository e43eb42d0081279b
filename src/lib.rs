//! sdkgen: RPC client SDK generation
//!
//! Generates statically-typed client SDK modules from a remote service's
//! self-describing procedure catalog: fetch and cache the descriptor, group
//! flat procedure names into class/method definitions, and safely replace
//! previously generated artifacts.

pub mod builder;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod logging;
pub mod maker;
pub mod model;
pub mod regeneration;
pub mod registry;
pub mod store;
