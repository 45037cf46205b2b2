//! Opening a session against a fake Liquibase installation

use super::common::{container_for, fake_liquibase_home, sample_catalog, serve_catalog};
use lpm::core::Version;
use lpm::package::PackageCatalog;
use lpm::resolver::{open, ClasspathScope};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_global_session_reads_host_version() {
    let temp = TempDir::new().unwrap();
    let home = fake_liquibase_home(temp.path(), "4.23.1");

    let engine = open(&container_for(&home), &ClasspathScope::Global).unwrap();

    assert_eq!(engine.host().version, Version::new(4, 23, 1));
    assert_eq!(
        engine.host().build_properties.get("build.timestamp").map(String::as_str),
        Some("2024-01-01")
    );
    assert!(engine.classpath_dir().ends_with("lib"));
    assert!(engine.classpath_dir().join("packages.json").exists());
    assert!(!engine.requires_java_opts_hint());
}

#[test]
fn test_local_session_writes_bundled_catalog() {
    let temp = TempDir::new().unwrap();
    let home = fake_liquibase_home(temp.path(), "4.5.0");
    let project = temp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();

    let engine = open(&container_for(&home), &ClasspathScope::Local(project.clone())).unwrap();

    let written = std::fs::read(project.join("liquibase_libs").join("packages.json")).unwrap();
    assert_eq!(written, PackageCatalog::bundled_bytes());
    assert!(engine.requires_java_opts_hint());
}

#[tokio::test]
async fn test_updated_catalog_survives_reopen() {
    let server = MockServer::start().await;
    let catalog = sample_catalog(&server.uri());
    Mock::given(method("GET"))
        .and(path("/packages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(catalog.to_json().unwrap()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let home = fake_liquibase_home(temp.path(), "4.25.0");
    let container = container_for(&home);

    let mut engine = open(&container, &ClasspathScope::Global).unwrap();
    let count = engine
        .update_catalog(&format!("{}/packages.json", server.uri()))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let reopened = open(&container, &ClasspathScope::Global).unwrap();
    assert!(reopened.catalog().by_name("liquibase-mongodb").is_some());
}

#[tokio::test]
async fn test_fresh_project_picks_up_updated_catalog() {
    let server = MockServer::start().await;
    let catalog = sample_catalog(&server.uri());
    serve_catalog(&server, &catalog).await;
    Mock::given(method("GET"))
        .and(path("/packages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(catalog.to_json().unwrap()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let home = fake_liquibase_home(temp.path(), "4.25.0");
    let project = temp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    let container = container_for(&home);
    let local = ClasspathScope::Local(project.clone());

    // First local open only has the bundled catalog to go on
    let before = open(&container, &local).unwrap();
    assert!(before.catalog().is_empty());

    let mut global = open(&container, &ClasspathScope::Global).unwrap();
    global
        .update_catalog(&format!("{}/packages.json", server.uri()))
        .await
        .unwrap();

    let mut engine = open(&container, &local).unwrap();
    let installed = engine.resolve_and_install("postgresql").await.unwrap();

    assert_eq!(installed.tag, "42.7.3");
    assert!(project
        .join("liquibase_libs")
        .join("postgresql-42.7.3.jar")
        .exists());
    let seeded = std::fs::read(project.join("liquibase_libs").join("packages.json")).unwrap();
    assert_eq!(PackageCatalog::from_bytes(&seeded).unwrap(), catalog);
}

#[test]
fn test_missing_home_is_host_not_found() {
    let temp = TempDir::new().unwrap();
    let container = container_for(&temp.path().join("nowhere"));

    let result = open(&container, &ClasspathScope::Global);
    assert!(matches!(result, Err(lpm::LpmError::HostNotFound(_))));
}
