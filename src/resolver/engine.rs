use crate::core::path::CATALOG_FILE;
use crate::core::{LpmError, LpmResult, Version};
use crate::di::ArtifactFetcher;
use crate::host::HostInfo;
use crate::package::catalog::PackageCatalog;
use crate::package::classpath::ClasspathStore;
use crate::package::dependency::{DependencyRecord, PackageSpec};
use crate::package::fetcher::is_remote;
use crate::package::model::{Category, Package, PackageVersion};
use std::path::Path;
use std::sync::Arc;

/// Liquibase releases before this need the classpath passed through `JAVA_OPTS`
const JAVA_OPTS_THRESHOLD: Version = Version {
    major: 4,
    minor: 6,
    patch: 2,
    prerelease: None,
    build_metadata: None,
};

/// Result of one item in a batch
#[derive(Debug)]
pub struct ItemOutcome<T = PackageVersion> {
    /// The spec, package name or artifact filename the item was requested as
    pub subject: String,
    pub result: LpmResult<T>,
}

impl<T> ItemOutcome<T> {
    fn new(subject: &str, result: LpmResult<T>) -> Self {
        Self {
            subject: subject.to_string(),
            result,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A completed upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upgrade {
    pub name: String,
    pub from: PackageVersion,
    pub to: PackageVersion,
}

/// Duplicate versions found for one package
#[derive(Debug)]
pub struct DedupeReport {
    pub name: String,
    /// Highest installed version; left in place
    pub kept: PackageVersion,
    /// Every other installed version, highest first
    pub duplicates: Vec<PackageVersion>,
    /// One outcome per duplicate, keyed by artifact filename; empty on a dry run
    pub removed: Vec<ItemOutcome>,
}

/// Decides and applies install, remove and upgrade actions for one classpath
pub struct ResolutionEngine {
    catalog: PackageCatalog,
    host: HostInfo,
    store: ClasspathStore,
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl ResolutionEngine {
    pub fn new(
        catalog: PackageCatalog,
        host: HostInfo,
        store: ClasspathStore,
        fetcher: Arc<dyn ArtifactFetcher>,
    ) -> Self {
        Self {
            catalog,
            host,
            store,
            fetcher,
        }
    }

    pub fn catalog(&self) -> &PackageCatalog {
        &self.catalog
    }

    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    pub fn classpath_dir(&self) -> &Path {
        self.store.dir()
    }

    /// Current classpath file names
    pub fn filenames(&mut self) -> LpmResult<Vec<String>> {
        self.store.filenames()
    }

    /// Forget the cached classpath listing
    pub fn refresh(&mut self) {
        self.store.invalidate();
    }

    /// Resolve `spec` (`name` or `name@tag`) and install it
    pub async fn resolve_and_install(&mut self, spec: &str) -> LpmResult<PackageVersion> {
        let spec = PackageSpec::parse(spec)?;
        let package = self.find_package(&spec.name)?;

        let version = match &spec.tag {
            Some(tag) => package
                .version(tag)
                .cloned()
                .ok_or_else(|| LpmError::VersionNotFound {
                    name: spec.name.clone(),
                    tag: tag.clone(),
                })?,
            None => package
                .latest_compatible(&self.host.version)
                .cloned()
                .ok_or_else(|| LpmError::VersionIncompatible {
                    name: spec.name.clone(),
                    version: None,
                    required: None,
                    installed: self.host.version.to_string(),
                })?,
        };

        // An explicit tag bypasses latest_compatible
        if !package.is_driver() && !version.supports_host(&self.host.version) {
            return Err(LpmError::VersionIncompatible {
                name: spec.name,
                version: Some(version.tag.clone()),
                required: version.required_host().map(str::to_string),
                installed: self.host.version.to_string(),
            });
        }

        let filenames = self.store.filenames()?;
        if let Some(existing) = package.installed_version(&filenames) {
            return Err(LpmError::AlreadyInstalled {
                name: spec.name,
                installed_tag: existing.tag.clone(),
            });
        }

        tracing::debug!("Installing {}@{}", package.name, version.tag);
        self.store.install(&version).await?;
        Ok(version)
    }

    /// Remove the installed version of `name`
    pub fn remove_package(&mut self, name: &str) -> LpmResult<PackageVersion> {
        let package = self.find_package(name)?;
        let installed = self.installed_version_of(&package)?;

        self.store.remove_version(&installed)?;
        Ok(installed)
    }

    /// Replace the installed version of `name` with its latest compatible version
    ///
    /// Not transactional: if the install fails after the old artifact was
    /// removed, the package is left uninstalled and the error is returned.
    pub async fn upgrade_package(&mut self, name: &str) -> LpmResult<Upgrade> {
        let package = self.find_package(name)?;
        let installed = self.installed_version_of(&package)?;

        let latest = package.latest_compatible(&self.host.version).cloned();
        let newer = latest.filter(|latest| {
            matches!(
                (installed.parsed_tag(), latest.parsed_tag()),
                (Some(current), Some(candidate)) if candidate > current
            )
        });

        let Some(latest) = newer else {
            return Err(LpmError::VersionIncompatible {
                name: name.to_string(),
                version: Some(installed.tag.clone()),
                required: None,
                installed: self.host.version.to_string(),
            });
        };

        self.store.remove_version(&installed)?;
        self.store.install(&latest).await?;

        Ok(Upgrade {
            name: package.name,
            from: installed,
            to: latest,
        })
    }

    /// Install every spec, continuing past failures
    pub async fn add_all(&mut self, specs: &[String]) -> Vec<ItemOutcome> {
        let mut outcomes = Vec::with_capacity(specs.len());
        for spec in specs {
            let result = self.resolve_and_install(spec).await;
            outcomes.push(ItemOutcome::new(spec, result));
        }
        outcomes
    }

    /// Remove every named package, continuing past failures
    pub fn remove_all(&mut self, names: &[String]) -> Vec<ItemOutcome> {
        names
            .iter()
            .map(|name| ItemOutcome::new(name, self.remove_package(name)))
            .collect()
    }

    /// Upgrade the named packages, or every outdated package when `names` is empty
    pub async fn upgrade_all(&mut self, names: &[String]) -> LpmResult<Vec<ItemOutcome<Upgrade>>> {
        let targets: Vec<String> = if names.is_empty() {
            self.outdated()?
                .packages()
                .iter()
                .map(|p| p.name.clone())
                .collect()
        } else {
            names.to_vec()
        };

        let mut outcomes = Vec::with_capacity(targets.len());
        for name in &targets {
            let result = self.upgrade_package(name).await;
            outcomes.push(ItemOutcome::new(name, result));
        }
        Ok(outcomes)
    }

    /// Install every manifest record at its recorded tag
    pub async fn install_from_manifest(&mut self, records: &[DependencyRecord]) -> Vec<ItemOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            let spec = record.to_spec();
            let result = self.resolve_and_install(&spec).await;
            outcomes.push(ItemOutcome::new(&record.name, result));
        }
        outcomes
    }

    /// Keep only the highest installed version of each package
    ///
    /// With `dry_run` nothing is deleted; the reports still list the
    /// duplicates. A failed removal is recorded in its report and the
    /// remaining duplicates are still processed.
    pub fn dedupe(&mut self, dry_run: bool) -> LpmResult<Vec<DedupeReport>> {
        let filenames = self.store.filenames()?;
        let mut reports = Vec::new();

        for package in self.catalog.installed(&filenames).packages() {
            let mut versions: Vec<PackageVersion> = package
                .installed_versions(&filenames)
                .into_iter()
                .cloned()
                .collect();
            if versions.len() < 2 {
                continue;
            }

            // Highest first; unparsable tags sort last
            versions.sort_by(|a, b| b.parsed_tag().cmp(&a.parsed_tag()));
            let kept = versions.remove(0);

            let removed = if dry_run {
                Vec::new()
            } else {
                versions
                    .iter()
                    .map(|version| {
                        let result = self.store.remove_version(version).map(|()| version.clone());
                        if let Err(e) = &result {
                            tracing::warn!("Could not remove {}: {}", version.artifact_filename(), e);
                        }
                        ItemOutcome::new(version.artifact_filename(), result)
                    })
                    .collect()
            };

            reports.push(DedupeReport {
                name: package.name.clone(),
                kept,
                duplicates: versions,
                removed,
            });
        }

        Ok(reports)
    }

    /// Replace the catalog from a URL or a local file
    ///
    /// The current catalog stays in place unless the new one parses, looks
    /// plausible and was written to the classpath.
    pub async fn update_catalog(&mut self, source: &str) -> LpmResult<usize> {
        let bytes = if is_remote(source) {
            self.fetcher.fetch(source).await?
        } else {
            std::fs::read(source).map_err(|e| {
                LpmError::Manifest(format!("Failed to read catalog from {}: {}", source, e))
            })?
        };

        let catalog = PackageCatalog::from_bytes(&bytes)?;
        if !catalog.is_plausible() {
            return Err(LpmError::Manifest(format!(
                "Invalid packages.json content from {}",
                source
            )));
        }

        self.store.write_file(CATALOG_FILE, &bytes)?;
        tracing::info!("Catalog updated from {} ({} packages)", source, catalog.len());

        let count = catalog.len();
        self.catalog = catalog;
        Ok(count)
    }

    /// Catalog packages with an artifact in the classpath
    pub fn installed(&mut self) -> LpmResult<PackageCatalog> {
        let filenames = self.store.filenames()?;
        Ok(self.catalog.installed(&filenames))
    }

    /// Installed packages with a newer compatible version available
    pub fn outdated(&mut self) -> LpmResult<PackageCatalog> {
        let filenames = self.store.filenames()?;
        Ok(self.catalog.outdated(&self.host.version, &filenames))
    }

    /// Catalog packages whose name contains `term`, optionally of one category
    pub fn search(&self, term: &str, category: Option<Category>) -> PackageCatalog {
        self.catalog
            .filter_by_category(category)
            .filter_by_name_substring(term)
    }

    /// Whether the host is too old to pick up `./liquibase_libs` on its own
    pub fn requires_java_opts_hint(&self) -> bool {
        self.host.version < JAVA_OPTS_THRESHOLD
    }

    fn find_package(&self, name: &str) -> LpmResult<Package> {
        self.catalog
            .by_name(name)
            .cloned()
            .ok_or_else(|| LpmError::PackageNotFound {
                name: name.to_string(),
            })
    }

    fn installed_version_of(&mut self, package: &Package) -> LpmResult<PackageVersion> {
        let filenames = self.store.filenames()?;
        package
            .installed_version(&filenames)
            .cloned()
            .ok_or_else(|| LpmError::PackageNotInstalled {
                name: package.name.clone(),
            })
    }
}
