//! Service container for dependency injection

use super::traits::{ArtifactFetcher, ConfigProvider, HostDetector};
use crate::config::Config;
use crate::core::LpmResult;
use crate::host::LiquibaseDetector;
use crate::package::fetcher::HttpFetcher;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the collaborators shared by every command as trait objects, so
/// tests can replace any of them.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub fetcher: Arc<dyn ArtifactFetcher>,
    pub host_detector: Arc<dyn HostDetector>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Config file cannot be loaded or created
    /// - The HTTP client cannot be built
    pub fn new() -> LpmResult<Self> {
        let config = Config::load()?;
        let detector = LiquibaseDetector::new(config.liquibase_home.clone());

        Ok(Self {
            config: Arc::new(config),
            fetcher: Arc::new(HttpFetcher::new()?),
            host_detector: Arc::new(detector),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        fetcher: Arc<dyn ArtifactFetcher>,
        host_detector: Arc<dyn HostDetector>,
    ) -> Self {
        Self {
            config,
            fetcher,
            host_detector,
        }
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }
}
