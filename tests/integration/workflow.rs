//! Install / remove / upgrade workflows over a real classpath directory

use super::common::{engine, sample_catalog, serve_catalog};
use lpm::core::LpmError;
use lpm::di::ManifestStore;
use lpm::package::{DependencyList, DependencyManifest, DependencyRecord};
use tempfile::TempDir;
use wiremock::MockServer;

fn jars(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.ends_with(".jar"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_add_remove_add_is_idempotent() {
    let server = MockServer::start().await;
    let catalog = sample_catalog(&server.uri());
    serve_catalog(&server, &catalog).await;

    let temp = TempDir::new().unwrap();
    let mut engine = engine(catalog, temp.path(), "4.25.0");

    let first = engine.resolve_and_install("liquibase-mongodb").await.unwrap();
    assert_eq!(first.tag, "4.20.0");
    let after_install = jars(temp.path());

    engine.remove_package("liquibase-mongodb").unwrap();
    assert!(jars(temp.path()).is_empty());

    let second = engine.resolve_and_install("liquibase-mongodb").await.unwrap();
    assert_eq!(second, first);
    assert_eq!(jars(temp.path()), after_install);
}

#[tokio::test]
async fn test_batch_add_reports_each_item() {
    let server = MockServer::start().await;
    let catalog = sample_catalog(&server.uri());
    serve_catalog(&server, &catalog).await;

    let temp = TempDir::new().unwrap();
    let mut engine = engine(catalog, temp.path(), "4.25.0");

    let specs = vec![
        "postgresql@42.6.0".to_string(),
        "liquibase-mongodb@4.30.0".to_string(),
        "unknown".to_string(),
        "liquibase-mongodb".to_string(),
    ];
    let outcomes = engine.add_all(&specs).await;

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[0].is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(LpmError::VersionIncompatible { .. })
    ));
    assert!(matches!(
        outcomes[2].result,
        Err(LpmError::PackageNotFound { .. })
    ));
    assert!(outcomes[3].is_ok());
    assert_eq!(
        jars(temp.path()),
        vec!["liquibase-mongodb-4.20.0.jar", "postgresql-42.6.0.jar"]
    );
}

#[tokio::test]
async fn test_upgrade_outdated_packages() {
    let server = MockServer::start().await;
    let catalog = sample_catalog(&server.uri());
    serve_catalog(&server, &catalog).await;

    let temp = TempDir::new().unwrap();
    let mut engine = engine(catalog, temp.path(), "4.25.0");
    engine.resolve_and_install("postgresql@42.6.0").await.unwrap();
    engine
        .resolve_and_install("liquibase-mongodb@4.10.0")
        .await
        .unwrap();

    assert_eq!(engine.outdated().unwrap().len(), 2);

    let outcomes = engine.upgrade_all(&[]).await.unwrap();
    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(
        jars(temp.path()),
        vec!["liquibase-mongodb-4.20.0.jar", "postgresql-42.7.3.jar"]
    );
    assert!(engine.outdated().unwrap().is_empty());
}

#[tokio::test]
async fn test_install_from_manifest_on_disk() {
    let server = MockServer::start().await;
    let catalog = sample_catalog(&server.uri());
    serve_catalog(&server, &catalog).await;

    let project = TempDir::new().unwrap();
    let manifest = DependencyManifest::in_project(project.path());
    let mut list = DependencyList::new();
    list.add(DependencyRecord::new("postgresql", "42.6.0"));
    list.add(DependencyRecord::new("liquibase-mongodb", "4.10.0"));
    manifest.write(list.records()).unwrap();

    let classpath = project.path().join("liquibase_libs");
    let mut engine = engine(catalog, &classpath, "4.25.0");
    let records = manifest.read().unwrap();
    let outcomes = engine.install_from_manifest(&records).await;

    assert_eq!(outcomes[0].subject, "postgresql");
    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(
        jars(&classpath),
        vec!["liquibase-mongodb-4.10.0.jar", "postgresql-42.6.0.jar"]
    );
}

#[tokio::test]
async fn test_dedupe_keeps_highest_on_disk() {
    let server = MockServer::start().await;
    let catalog = sample_catalog(&server.uri());
    serve_catalog(&server, &catalog).await;

    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("postgresql-42.6.0.jar"), b"old").unwrap();
    std::fs::write(temp.path().join("postgresql-42.7.3.jar"), b"new").unwrap();

    let mut engine = engine(catalog, temp.path(), "4.25.0");
    let reports = engine.dedupe(false).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kept.tag, "42.7.3");
    assert_eq!(jars(temp.path()), vec!["postgresql-42.7.3.jar"]);
}
