//! End-to-end pipeline tests: fetch → build → regenerate.

use super::test_utils::{sample_descriptor, test_maker};
use sdkgen::error::MakerError;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_make_generates_one_module_per_class() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    let report = maker.make(None).await.unwrap();

    assert_eq!(report.vendor_alias, "ApiExampleCom");
    assert_eq!(report.class_count, 3);
    assert_eq!(report.removed_count, 0);

    let out = temp_dir.path().join("generated").join("api_example_com");
    assert!(out.join("user.rs").exists());
    assert!(out.join("billing.rs").exists());
    assert!(out.join("main.rs").exists());
    assert!(temp_dir
        .path()
        .join("generated")
        .join(".artifacts.json")
        .exists());
}

#[tokio::test]
async fn test_generated_module_carries_full_procedure_name() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    maker.make(None).await.unwrap();

    let content = std::fs::read_to_string(
        temp_dir
            .path()
            .join("generated/api_example_com/user.rs"),
    )
    .unwrap();
    assert!(content.contains("\"user.getById\""));
    assert!(content.contains("\"user.find\""));
}

#[tokio::test]
async fn test_dotless_procedure_lands_in_main_class() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(
        temp_dir.path(),
        json!({"procedures": {"ping": {"returns": "string", "parameters": []}}}),
        3600,
    );

    let report = maker.make(None).await.unwrap();

    assert_eq!(report.class_count, 1);
    assert_eq!(report.classes[0].0, "sdk.client.ApiExampleCom.Main");
    let content =
        std::fs::read_to_string(temp_dir.path().join("generated/api_example_com/main.rs"))
            .unwrap();
    assert!(content.contains("\"ping\""));
}

#[tokio::test]
async fn test_second_make_replaces_previous_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    maker.make(None).await.unwrap();
    let report = maker.make(None).await.unwrap();

    assert_eq!(report.class_count, 3);
    assert_eq!(report.removed_count, 3);
}

#[tokio::test]
async fn test_observer_sees_every_class_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    let mut seen = Vec::new();
    let mut observer = |class: &sdkgen::model::ClassDefinition| seen.push(class.full_name());
    maker.make(Some(&mut observer)).await.unwrap();

    assert_eq!(
        seen,
        vec![
            "sdk.client.ApiExampleCom.User".to_string(),
            "sdk.client.ApiExampleCom.Billing".to_string(),
            "sdk.client.ApiExampleCom.Main".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_malformed_descriptor_produces_no_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), json!({"version": 2}), 3600);

    let err = maker.make(None).await.unwrap_err();
    assert!(matches!(err, MakerError::MalformedDescriptor(_)));
    assert!(!temp_dir.path().join("generated/api_example_com").exists());
}
