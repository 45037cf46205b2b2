//! Mock implementations of service traits for testing

use super::traits::{ArtifactFetcher, ConfigProvider, HostDetector, ManifestStore, Presenter};
use crate::core::path::LOCAL_CLASSPATH_DIR;
use crate::core::{LpmError, LpmResult, Version};
use crate::host::HostInfo;
use crate::package::dependency::DependencyRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use lpm::di::mocks::MockConfigProvider;
/// use lpm::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.local_classpath_dir = "libs".to_string();
///
/// assert_eq!(config.local_classpath_dir(), "libs");
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub catalog_url: String,
    pub local_classpath_dir: String,
    pub liquibase_home: Option<PathBuf>,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            catalog_url: "https://catalog.example.com/packages.json".to_string(),
            local_classpath_dir: LOCAL_CLASSPATH_DIR.to_string(),
            liquibase_home: None,
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    fn local_classpath_dir(&self) -> &str {
        &self.local_classpath_dir
    }

    fn liquibase_home(&self) -> Option<&Path> {
        self.liquibase_home.as_deref()
    }
}

/// Mock artifact fetcher for testing
///
/// Serves bodies from memory and records every requested locator.
///
/// # Example
///
/// ```
/// use lpm::di::mocks::MockArtifactFetcher;
///
/// let fetcher = MockArtifactFetcher::new();
/// fetcher.add_artifact("https://repo.example.com/a.jar", b"bytes".to_vec());
/// fetcher.add_status("https://repo.example.com/missing.jar", 404);
/// ```
#[derive(Clone, Default)]
pub struct MockArtifactFetcher {
    artifacts: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    statuses: Arc<Mutex<HashMap<String, u16>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockArtifactFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `locator`
    pub fn add_artifact(&self, locator: &str, body: Vec<u8>) {
        self.artifacts
            .lock()
            .unwrap()
            .insert(locator.to_string(), body);
    }

    /// Answer `locator` with a non-success HTTP status
    pub fn add_status(&self, locator: &str, status: u16) {
        self.statuses
            .lock()
            .unwrap()
            .insert(locator.to_string(), status);
    }

    /// Locators requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactFetcher for MockArtifactFetcher {
    async fn fetch(&self, locator: &str) -> LpmResult<Vec<u8>> {
        self.requests.lock().unwrap().push(locator.to_string());

        if let Some(status) = self.statuses.lock().unwrap().get(locator) {
            return Err(LpmError::FetchStatus {
                locator: locator.to_string(),
                status: *status,
            });
        }

        self.artifacts
            .lock()
            .unwrap()
            .get(locator)
            .cloned()
            .ok_or_else(|| LpmError::FetchFailed {
                locator: locator.to_string(),
                cause: "connection refused".to_string(),
            })
    }
}

/// Host detector that always reports the same installation
#[derive(Clone)]
pub struct StaticHostDetector {
    host: Option<HostInfo>,
}

impl StaticHostDetector {
    pub fn new(home: PathBuf, version: &str) -> LpmResult<Self> {
        Ok(Self {
            host: Some(HostInfo::new(home, Version::parse(version)?)),
        })
    }

    /// A detector that never finds an installation
    pub fn missing() -> Self {
        Self { host: None }
    }
}

impl HostDetector for StaticHostDetector {
    fn detect(&self) -> LpmResult<HostInfo> {
        self.host
            .clone()
            .ok_or_else(|| LpmError::HostNotFound("No installation configured".to_string()))
    }
}

/// In-memory dependency manifest
#[derive(Clone, Default)]
pub struct MockManifestStore {
    records: Arc<Mutex<Option<Vec<DependencyRecord>>>>,
}

impl MockManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<DependencyRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Some(records))),
        }
    }
}

impl ManifestStore for MockManifestStore {
    fn read(&self) -> LpmResult<Vec<DependencyRecord>> {
        Ok(self.records.lock().unwrap().clone().unwrap_or_default())
    }

    fn write(&self, records: &[DependencyRecord]) -> LpmResult<()> {
        *self.records.lock().unwrap() = Some(records.to_vec());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.records.lock().unwrap().is_some()
    }
}

/// Presenter that records output instead of printing it
#[derive(Clone, Default)]
pub struct MockPresenter {
    lines: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Presenter for MockPresenter {
    fn show(&self, lines: &[String]) {
        self.lines.lock().unwrap().extend_from_slice(lines);
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
