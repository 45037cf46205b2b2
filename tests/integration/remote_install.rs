//! Checksum-verified downloads through the HTTP fetcher

use super::common::{artifact_body, engine, sample_catalog};
use lpm::core::LpmError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_tampered_artifact_is_not_written() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/postgresql-42.7.3.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tampered".to_vec()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let mut engine = engine(sample_catalog(&server.uri()), temp.path(), "4.25.0");

    let err = engine.resolve_and_install("postgresql").await.unwrap_err();
    assert!(matches!(err, LpmError::ChecksumMismatch { .. }));
    assert!(!temp.path().join("postgresql-42.7.3.jar").exists());
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let mut engine = engine(sample_catalog(&server.uri()), temp.path(), "4.25.0");

    let err = engine.resolve_and_install("postgresql").await.unwrap_err();
    assert!(matches!(err, LpmError::FetchStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_failed_upgrade_leaves_package_removed() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("postgresql-42.6.0.jar"),
        artifact_body("postgresql-42.6.0.jar"),
    )
    .unwrap();
    Mock::given(method("GET"))
        .and(path("/postgresql-42.7.3.jar"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut engine = engine(sample_catalog(&server.uri()), temp.path(), "4.25.0");
    let result = engine.upgrade_package("postgresql").await;

    assert!(matches!(result, Err(LpmError::FetchStatus { status: 404, .. })));
    assert!(engine.installed().unwrap().is_empty());
}
