use crate::core::path::ensure_dir;
use crate::core::{LpmError, LpmResult};
use crate::di::ArtifactFetcher;
use crate::package::checksum::ChecksumVerifier;
use crate::package::model::PackageVersion;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Artifact files in one classpath directory
///
/// Directory listings are cached until the next mutation or an explicit
/// [`invalidate`](Self::invalidate). One store should own a directory; the
/// cache does not notice changes made by anyone else.
pub struct ClasspathStore {
    dir: PathBuf,
    fetcher: Arc<dyn ArtifactFetcher>,
    cached: Option<Vec<String>>,
}

impl ClasspathStore {
    pub fn new(dir: PathBuf, fetcher: Arc<dyn ArtifactFetcher>) -> Self {
        Self {
            dir,
            fetcher,
            cached: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sorted names of the regular files directly under the directory
    ///
    /// A missing directory lists as empty.
    pub fn filenames(&mut self) -> LpmResult<Vec<String>> {
        if let Some(cached) = &self.cached {
            return Ok(cached.clone());
        }

        let names = self.list()?;
        self.cached = Some(names.clone());
        Ok(names)
    }

    pub fn contains(&mut self, filename: &str) -> LpmResult<bool> {
        Ok(self.filenames()?.iter().any(|f| f == filename))
    }

    /// Drop the cached listing; the next query re-reads the directory
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            tracing::debug!("Classpath cache invalidated for {}", self.dir.display());
        }
    }

    pub fn ensure_exists(&self) -> LpmResult<()> {
        ensure_dir(&self.dir)
    }

    /// Place `version`'s artifact into the directory
    ///
    /// Remote artifacts are always verified. Local artifacts are verified
    /// only when the version carries a non-blank checksum.
    pub async fn install(&mut self, version: &PackageVersion) -> LpmResult<PathBuf> {
        let filename = version.artifact_filename();
        if filename.is_empty() {
            return Err(LpmError::InvalidSpec(format!(
                "version {} has no artifact path",
                version.tag
            )));
        }

        let bytes = if version.is_remote() {
            self.fetcher
                .fetch_and_verify(
                    &version.locator,
                    version.expected_digest().unwrap_or_default(),
                    &version.algorithm,
                    filename,
                )
                .await?
        } else {
            let bytes = fs::read(&version.locator).map_err(|e| LpmError::FetchFailed {
                locator: version.locator.clone(),
                cause: e.to_string(),
            })?;
            match version.expected_digest() {
                Some(expected) => {
                    ChecksumVerifier::verify_or_fail(&bytes, expected, &version.algorithm, filename)?
                }
                None => tracing::warn!(
                    "Installing {} from {} without checksum verification",
                    filename,
                    version.locator
                ),
            }
            bytes
        };

        let target = self.write_file(filename, &bytes)?;
        tracing::info!("Installed {} into {}", filename, self.dir.display());
        Ok(target)
    }

    /// Delete `filename` from the directory; a missing file is not an error
    pub fn remove(&mut self, filename: &str) -> LpmResult<()> {
        let target = self.dir.join(filename);
        let result = match fs::remove_file(&target) {
            Ok(()) => {
                tracing::info!("Removed {}", target.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LpmError::store(&target, e)),
        };
        self.invalidate();
        result
    }

    /// Delete the artifact belonging to `version`
    pub fn remove_version(&mut self, version: &PackageVersion) -> LpmResult<()> {
        self.remove(version.artifact_filename())
    }

    /// Create or truncate `filename` with `bytes`
    pub fn write_file(&mut self, filename: &str, bytes: &[u8]) -> LpmResult<PathBuf> {
        self.ensure_exists()?;
        let target = self.dir.join(filename);
        let result = fs::write(&target, bytes).map_err(|e| LpmError::store(&target, e));
        self.invalidate();
        result.map(|()| target)
    }

    /// Read `filename` if it exists
    pub fn read_file(&self, filename: &str) -> LpmResult<Option<Vec<u8>>> {
        let target = self.dir.join(filename);
        match fs::read(&target) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LpmError::store(&target, e)),
        }
    }

    fn list(&self) -> LpmResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LpmError::store(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LpmError::store(&self.dir, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}
