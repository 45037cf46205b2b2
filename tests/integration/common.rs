//! Common utilities for integration tests

use lpm::core::Version;
use lpm::di::mocks::MockConfigProvider;
use lpm::di::ServiceContainer;
use lpm::host::{HostInfo, LiquibaseDetector};
use lpm::package::{
    Category, ChecksumVerifier, ClasspathStore, HttpFetcher, Package, PackageCatalog,
    PackageVersion,
};
use lpm::resolver::ResolutionEngine;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::FileOptions;

pub fn artifact_body(file: &str) -> Vec<u8> {
    format!("jar bytes of {}", file).into_bytes()
}

/// A version served from `base_url/<file>` with its real SHA256 digest
pub fn served_version(base_url: &str, tag: &str, file: &str) -> PackageVersion {
    PackageVersion::new(
        tag,
        &format!("{}/{}", base_url, file),
        "SHA256",
        &ChecksumVerifier::digest(&artifact_body(file), "SHA256").unwrap(),
    )
}

/// Serve every version of every package in `catalog` from `server`
pub async fn serve_catalog(server: &MockServer, catalog: &PackageCatalog) {
    for package in catalog.packages() {
        for version in &package.versions {
            let file = version.artifact_filename().to_string();
            Mock::given(method("GET"))
                .and(path(format!("/{}", file)))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(artifact_body(&file)))
                .mount(server)
                .await;
        }
    }
}

/// Driver with two versions and an extension whose versions need newer hosts
pub fn sample_catalog(base_url: &str) -> PackageCatalog {
    PackageCatalog::new(vec![
        Package::new(
            "postgresql",
            Category::Driver,
            vec![
                served_version(base_url, "42.6.0", "postgresql-42.6.0.jar"),
                served_version(base_url, "42.7.3", "postgresql-42.7.3.jar"),
            ],
        ),
        Package::new(
            "liquibase-mongodb",
            Category::Extension,
            vec![
                served_version(base_url, "4.10.0", "liquibase-mongodb-4.10.0.jar")
                    .with_min_host_version("4.10.0"),
                served_version(base_url, "4.20.0", "liquibase-mongodb-4.20.0.jar")
                    .with_min_host_version("4.20.0"),
                served_version(base_url, "4.30.0", "liquibase-mongodb-4.30.0.jar")
                    .with_min_host_version("4.30.0"),
            ],
        ),
    ])
}

/// Engine over a real classpath directory and the HTTP fetcher
pub fn engine(catalog: PackageCatalog, classpath: &Path, host_version: &str) -> ResolutionEngine {
    let fetcher = Arc::new(HttpFetcher::new().unwrap());
    let host = HostInfo::new(
        classpath.to_path_buf(),
        Version::parse(host_version).unwrap(),
    );
    let store = ClasspathStore::new(classpath.to_path_buf(), fetcher.clone());
    ResolutionEngine::new(catalog, host, store, fetcher)
}

/// Lay out a Liquibase home whose `liquibase.jar` reports `version`
pub fn fake_liquibase_home(root: &Path, version: &str) -> PathBuf {
    let home = root.join("liquibase");
    fs::create_dir_all(home.join("lib")).unwrap();

    let mut zip = zip::ZipWriter::new(File::create(home.join("liquibase.jar")).unwrap());
    zip.start_file("liquibase.build.properties", FileOptions::default())
        .unwrap();
    writeln!(zip, "build.version={}", version).unwrap();
    writeln!(zip, "build.timestamp=2024-01-01").unwrap();
    zip.finish().unwrap();

    home
}

/// Production wiring except for the config, which points at `home`
pub fn container_for(home: &Path) -> ServiceContainer {
    let config = MockConfigProvider {
        liquibase_home: Some(home.to_path_buf()),
        ..MockConfigProvider::default()
    };
    ServiceContainer::with_providers(
        Arc::new(config),
        Arc::new(HttpFetcher::new().unwrap()),
        Arc::new(LiquibaseDetector::new(Some(home.to_path_buf()))),
    )
}
