//! CLI run context and configuration loading.

use sdkgen::cli::{CacheCommands, Commands, RunContext};
use tempfile::TempDir;

#[test]
fn test_run_context_loads_project_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("sdkgen.toml"),
        r#"
endpoint = "https://rpc.acme.io/doc"
vendor_alias = "Acme"
namespace = "acme.sdk"
"#,
    )
    .unwrap();

    let context = RunContext::new(temp_dir.path().to_path_buf(), None).unwrap();
    assert_eq!(context.config().endpoint, "https://rpc.acme.io/doc");
    assert_eq!(context.config().vendor_alias.as_deref(), Some("Acme"));
    assert_eq!(context.config().namespace, "acme.sdk");
    assert_eq!(context.config().project_root, temp_dir.path());
}

#[test]
fn test_cache_status_with_empty_cache() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("sdkgen.toml"),
        "endpoint = \"https://rpc.acme.io/doc\"\n",
    )
    .unwrap();

    let context = RunContext::new(temp_dir.path().to_path_buf(), None).unwrap();
    let output = context
        .execute(&Commands::Cache {
            command: CacheCommands::Status,
        })
        .unwrap();
    assert_eq!(output, "rpc.descriptor.RpcAcmeIo: no cached descriptor");
}

#[test]
fn test_generate_without_endpoint_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let context = RunContext::new(temp_dir.path().to_path_buf(), None).unwrap();

    let err = context
        .execute(&Commands::Generate {
            endpoint: None,
            vendor: None,
            namespace: None,
            headers: vec![],
            ttl: None,
            out: None,
            refresh: false,
        })
        .unwrap_err();
    assert!(matches!(err, sdkgen::error::MakerError::Config(_)));
}
