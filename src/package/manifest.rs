use crate::core::path::dependency_manifest_file;
use crate::core::{LpmError, LpmResult};
use crate::di::ManifestStore;
use crate::package::dependency::DependencyRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// `{"dependencies": [{"<name>": "<tag>"}, ...]}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    dependencies: Vec<BTreeMap<String, String>>,
}

/// The project's `liquibase.json`
#[derive(Debug, Clone)]
pub struct DependencyManifest {
    path: PathBuf,
}

impl DependencyManifest {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manifest in `project_root/liquibase.json`
    pub fn in_project(project_root: &Path) -> Self {
        Self::new(dependency_manifest_file(project_root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty manifest if none exists yet
    pub fn create_if_missing(&self) -> LpmResult<()> {
        if !self.exists() {
            self.write(&[])?;
        }
        Ok(())
    }

    fn manifest_error(&self, action: &str, e: impl std::fmt::Display) -> LpmError {
        LpmError::Manifest(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

impl ManifestStore for DependencyManifest {
    fn read(&self) -> LpmResult<Vec<DependencyRecord>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.manifest_error("read", e))?;
        let file: ManifestFile =
            serde_json::from_str(&content).map_err(|e| self.manifest_error("parse", e))?;

        Ok(file
            .dependencies
            .into_iter()
            .flat_map(|entry| entry.into_iter())
            .map(|(name, tag)| DependencyRecord { name, tag })
            .collect())
    }

    fn write(&self, records: &[DependencyRecord]) -> LpmResult<()> {
        let file = ManifestFile {
            dependencies: records
                .iter()
                .map(|r| BTreeMap::from([(r.name.clone(), r.tag.clone())]))
                .collect(),
        };

        let content =
            serde_json::to_string_pretty(&file).map_err(|e| self.manifest_error("serialize", e))?;
        fs::write(&self.path, content).map_err(|e| self.manifest_error("write", e))?;

        tracing::debug!("Wrote {} dependencies to {}", records.len(), self.path.display());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}
