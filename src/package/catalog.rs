use crate::core::{LpmError, LpmResult, Version};
use crate::package::model::{Category, Package};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Catalog compiled into the binary, used until a classpath copy exists
const BUNDLED_CATALOG: &[u8] = include_bytes!("../../assets/packages.json");

/// Wrapped on-disk shape of `packages.json`; a bare array is also accepted
#[derive(Deserialize)]
struct CatalogFile {
    packages: Vec<Package>,
}

#[derive(Serialize)]
struct CatalogFileRef<'a> {
    packages: &'a [Package],
}

/// In-memory registry of packages, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageCatalog {
    packages: Vec<Package>,
}

impl PackageCatalog {
    /// Build a catalog, keeping the first package for any repeated name
    pub fn new(packages: Vec<Package>) -> Self {
        let mut seen = HashSet::new();
        let packages = packages
            .into_iter()
            .filter(|p| {
                let first = seen.insert(p.name.clone());
                if !first {
                    tracing::warn!("Duplicate package '{}' in catalog; keeping the first", p.name);
                }
                first
            })
            .collect();
        Self { packages }
    }

    /// Parse `packages.json` content (wrapped object or bare array)
    pub fn from_bytes(bytes: &[u8]) -> LpmResult<Self> {
        let parse_error =
            |e: serde_json::Error| LpmError::Manifest(format!("Failed to parse packages.json: {}", e));

        let value: serde_json::Value = serde_json::from_slice(bytes).map_err(parse_error)?;
        let packages = if value.is_array() {
            serde_json::from_value::<Vec<Package>>(value).map_err(parse_error)?
        } else {
            serde_json::from_value::<CatalogFile>(value)
                .map_err(parse_error)?
                .packages
        };

        Ok(Self::new(packages))
    }

    /// The catalog shipped with the binary
    pub fn bundled() -> LpmResult<Self> {
        Self::from_bytes(BUNDLED_CATALOG)
    }

    pub fn bundled_bytes() -> &'static [u8] {
        BUNDLED_CATALOG
    }

    /// Serialize in the wrapped form, pretty-printed
    pub fn to_json(&self) -> LpmResult<Vec<u8>> {
        let file = CatalogFileRef {
            packages: &self.packages,
        };
        serde_json::to_vec_pretty(&file)
            .map_err(|e| LpmError::Manifest(format!("Failed to serialize packages: {}", e)))
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Packages of exactly `category`; `None` keeps everything
    pub fn filter_by_category(&self, category: Option<Category>) -> PackageCatalog {
        match category {
            None => self.clone(),
            Some(category) => self.filtered(|p| p.category == category),
        }
    }

    /// Case-insensitive substring match on the name; a blank term keeps everything
    pub fn filter_by_name_substring(&self, term: &str) -> PackageCatalog {
        let term = term.trim();
        if term.is_empty() {
            return self.clone();
        }
        let needle = term.to_lowercase();
        self.filtered(|p| p.name.to_lowercase().contains(&needle))
    }

    /// Packages with at least one version's artifact among `filenames`
    pub fn installed(&self, filenames: &[String]) -> PackageCatalog {
        self.filtered(|p| p.is_installed(filenames))
    }

    /// Installed packages whose installed version is older than the latest compatible one
    pub fn outdated(&self, host: &Version, filenames: &[String]) -> PackageCatalog {
        self.filtered(|p| {
            let Some(installed) = p.installed_version(filenames) else {
                return false;
            };
            let Some(latest) = p.latest_compatible(host) else {
                return false;
            };
            match (installed.parsed_tag(), latest.parsed_tag()) {
                (Some(installed), Some(latest)) => installed < latest,
                _ => false,
            }
        })
    }

    /// Cheap sanity check before a freshly fetched catalog replaces the current one
    pub fn is_plausible(&self) -> bool {
        !self.packages.is_empty()
    }

    fn filtered(&self, keep: impl Fn(&Package) -> bool) -> PackageCatalog {
        PackageCatalog {
            packages: self.packages.iter().filter(|p| keep(p)).cloned().collect(),
        }
    }
}
