//! Trait definitions for dependency injection

use crate::core::LpmResult;
use crate::host::HostInfo;
use crate::package::checksum::ChecksumVerifier;
use crate::package::dependency::DependencyRecord;
use async_trait::async_trait;
use std::path::Path;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Get the default source for `lpm update`
    fn catalog_url(&self) -> &str;

    /// Get the name of the project-local classpath directory
    fn local_classpath_dir(&self) -> &str;

    /// Get the configured Liquibase installation, if any
    fn liquibase_home(&self) -> Option<&Path>;
}

/// Trait for retrieving artifact bytes from a remote locator
///
/// Only remote (`http://` / `https://`) locators go through a fetcher.
/// Local paths are read by the caller.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Fetch the full body behind `locator`
    async fn fetch(&self, locator: &str) -> LpmResult<Vec<u8>>;

    /// Fetch `locator` and verify the body against `expected_digest`
    ///
    /// Returns the bytes only if both the fetch and the verification succeed.
    async fn fetch_and_verify(
        &self,
        locator: &str,
        expected_digest: &str,
        algorithm: &str,
        label: &str,
    ) -> LpmResult<Vec<u8>> {
        let bytes = self.fetch(locator).await?;
        ChecksumVerifier::verify_or_fail(&bytes, expected_digest, algorithm, label)?;
        Ok(bytes)
    }
}

/// Trait for locating the host Liquibase installation
#[cfg_attr(test, mockall::automock)]
pub trait HostDetector: Send + Sync {
    /// Detect the installation, failing with `HostNotFound`
    fn detect(&self) -> LpmResult<HostInfo>;
}

/// Trait for the project dependency manifest (liquibase.json)
pub trait ManifestStore: Send + Sync {
    /// Read all records; a missing manifest reads as empty
    fn read(&self) -> LpmResult<Vec<DependencyRecord>>;

    /// Replace the manifest contents with `records`
    fn write(&self, records: &[DependencyRecord]) -> LpmResult<()>;

    /// Check whether the manifest exists on disk
    fn exists(&self) -> bool;
}

/// Trait for user-facing output
pub trait Presenter: Send + Sync {
    /// Display lines in order
    fn show(&self, lines: &[String]);

    /// Display one line
    fn line(&self, line: &str) {
        self.show(&[line.to_string()]);
    }

    /// Display a per-item failure
    fn error(&self, message: &str);
}
