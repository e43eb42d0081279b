//! Integration tests for the sdkgen pipeline

mod cache_ttl;
mod cli_config;
mod generate_pipeline;
mod regeneration_replace;
mod test_utils;
