use crate::core::path::{local_classpath_dir, CATALOG_FILE};
use crate::core::LpmResult;
use crate::di::ServiceContainer;
use crate::host::HostInfo;
use crate::package::catalog::PackageCatalog;
use crate::package::classpath::ClasspathStore;
use crate::resolver::engine::ResolutionEngine;
use std::path::{Path, PathBuf};

/// Which classpath a command works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathScope {
    /// `<project root>/liquibase_libs` (name configurable)
    Local(PathBuf),
    /// `<liquibase home>/lib`
    Global,
}

impl ClasspathScope {
    pub fn is_global(&self) -> bool {
        matches!(self, ClasspathScope::Global)
    }

    fn dir(&self, container: &ServiceContainer, host: &HostInfo) -> PathBuf {
        match self {
            ClasspathScope::Local(root) => {
                local_classpath_dir(root, container.config().local_classpath_dir())
            }
            ClasspathScope::Global => host.lib_dir(),
        }
    }
}

/// Detect the host, pick the classpath and load its catalog
///
/// A local classpath without a usable `packages.json` is seeded from the
/// global one; otherwise a classpath gets a copy of the bundled catalog.
pub fn open(container: &ServiceContainer, scope: &ClasspathScope) -> LpmResult<ResolutionEngine> {
    let host = container.host_detector.detect()?;
    tracing::debug!(
        "Liquibase {} at {}",
        host.version,
        host.home.display()
    );

    let dir = scope.dir(container, &host);
    let mut store = ClasspathStore::new(dir, container.fetcher.clone());
    let global_catalog = host.lib_dir().join(CATALOG_FILE);
    let seed = (!scope.is_global()).then_some(global_catalog.as_path());
    let catalog = load_catalog(&mut store, seed)?;

    Ok(ResolutionEngine::new(
        catalog,
        host,
        store,
        container.fetcher.clone(),
    ))
}

/// Overwrite the project's `packages.json` with `catalog`, if the project has one
///
/// Returns whether a copy was written.
pub fn refresh_local_catalog(
    container: &ServiceContainer,
    project_root: &Path,
    catalog: &PackageCatalog,
) -> LpmResult<bool> {
    let dir = local_classpath_dir(project_root, container.config().local_classpath_dir());
    if !dir.join(CATALOG_FILE).is_file() {
        return Ok(false);
    }

    let mut store = ClasspathStore::new(dir, container.fetcher.clone());
    store.write_file(CATALOG_FILE, &catalog.to_json()?)?;
    tracing::debug!("Refreshed catalog in {}", store.dir().display());
    Ok(true)
}

fn load_catalog(store: &mut ClasspathStore, seed: Option<&Path>) -> LpmResult<PackageCatalog> {
    let existing = match store.read_file(CATALOG_FILE)? {
        Some(bytes) => {
            tracing::debug!("Loading catalog from {}", store.dir().display());
            let catalog = PackageCatalog::from_bytes(&bytes)?;
            if catalog.is_plausible() {
                return Ok(catalog);
            }
            Some(catalog)
        }
        None => None,
    };

    if let Some(seeded) = seed.and_then(read_seed) {
        tracing::debug!("Seeding catalog in {}", store.dir().display());
        store.write_file(CATALOG_FILE, &seeded.to_json()?)?;
        return Ok(seeded);
    }

    if let Some(catalog) = existing {
        return Ok(catalog);
    }

    tracing::debug!("No catalog in {}; writing bundled copy", store.dir().display());
    let catalog = PackageCatalog::bundled()?;
    store.write_file(CATALOG_FILE, PackageCatalog::bundled_bytes())?;
    Ok(catalog)
}

/// A plausible catalog at `path`; anything unreadable is skipped
fn read_seed(path: &Path) -> Option<PackageCatalog> {
    let bytes = std::fs::read(path).ok()?;
    match PackageCatalog::from_bytes(&bytes) {
        Ok(catalog) if catalog.is_plausible() => Some(catalog),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Ignoring catalog at {}: {}", path.display(), e);
            None
        }
    }
}
