//! Safe-replacement behavior through the full maker facade.

use super::test_utils::{sample_descriptor, test_maker};
use sdkgen::error::MakerError;
use tempfile::TempDir;

#[tokio::test]
async fn test_registry_file_mismatch_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    maker.make(None).await.unwrap();

    // Someone deleted a generated file behind the registry's back. The next
    // run must abort on the removal step rather than emit over the mismatch.
    std::fs::remove_file(temp_dir.path().join("generated/api_example_com/user.rs")).unwrap();

    let err = maker.make(None).await.unwrap_err();
    assert!(matches!(err, MakerError::Replacement { .. }));
}

#[tokio::test]
async fn test_aborted_run_leaves_later_classes_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    maker.make(None).await.unwrap();
    let billing = temp_dir.path().join("generated/api_example_com/billing.rs");
    let billing_before = std::fs::metadata(&billing).unwrap().modified().unwrap();

    // User is the first class in model order; breaking it stops the run
    // before Billing is reached.
    std::fs::remove_file(temp_dir.path().join("generated/api_example_com/user.rs")).unwrap();
    maker.make(None).await.unwrap_err();

    let billing_after = std::fs::metadata(&billing).unwrap().modified().unwrap();
    assert_eq!(billing_before, billing_after);
}

#[tokio::test]
async fn test_registry_tracks_artifacts_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    maker.make(None).await.unwrap();

    let registry_path = temp_dir.path().join("generated/.artifacts.json");
    let registry = sdkgen::registry::ArtifactRegistry::load(registry_path).unwrap();
    assert_eq!(registry.len(), 3);
    assert!(registry
        .resolve("sdk.client.ApiExampleCom.User")
        .unwrap()
        .ends_with("api_example_com/user.rs"));
}
