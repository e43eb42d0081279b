//! Descriptor cache behavior through the full maker facade.

use super::test_utils::{sample_descriptor, test_maker};
use tempfile::TempDir;

#[tokio::test]
async fn test_second_make_within_ttl_issues_no_request() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    maker.make(None).await.unwrap();
    maker.make(None).await.unwrap();

    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_make_after_expiry_issues_exactly_one_request() {
    let temp_dir = TempDir::new().unwrap();
    // Zero TTL: every make refetches.
    let (maker, source) = test_maker(temp_dir.path(), sample_descriptor(), 0);

    maker.make(None).await.unwrap();
    maker.make(None).await.unwrap();

    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn test_clear_cached_descriptor_forces_refetch() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    maker.make(None).await.unwrap();
    assert!(maker.clear_cached_descriptor().unwrap());
    maker.make(None).await.unwrap();

    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn test_cache_status_reports_freshness() {
    let temp_dir = TempDir::new().unwrap();
    let (maker, _source) = test_maker(temp_dir.path(), sample_descriptor(), 3600);

    assert!(maker.cache_status().unwrap().is_none());

    maker.make(None).await.unwrap();
    let status = maker.cache_status().unwrap().unwrap();
    assert!(status.fresh);
    assert_eq!(status.ttl_secs, 3600);
    assert_eq!(maker.cache_key(), "rpc.descriptor.ApiExampleCom");
}
