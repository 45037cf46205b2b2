//! The Liquibase installation packages are installed for

pub mod detector;

pub use detector::LiquibaseDetector;

use crate::core::Version;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A detected Liquibase installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub home: PathBuf,
    pub version: Version,
    /// Contents of `liquibase.build.properties`
    pub build_properties: BTreeMap<String, String>,
}

impl HostInfo {
    pub fn new(home: PathBuf, version: Version) -> Self {
        Self {
            home,
            version,
            build_properties: BTreeMap::new(),
        }
    }

    /// The global classpath, `<home>/lib`
    pub fn lib_dir(&self) -> PathBuf {
        self.home.join("lib")
    }
}
