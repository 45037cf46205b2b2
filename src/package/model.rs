use crate::core::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package category
///
/// Drivers are independent of the Liquibase version; extensions and pro
/// packages are filtered by their minimum Liquibase version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Extension,
    Driver,
    Pro,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Extension => "extension",
            Category::Driver => "driver",
            Category::Pro => "pro",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extension" => Ok(Category::Extension),
            "driver" => Ok(Category::Driver),
            "pro" => Ok(Category::Pro),
            other => Err(format!(
                "unknown category '{}' (expected extension, driver or pro)",
                other
            )),
        }
    }
}

/// One downloadable version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVersion {
    pub tag: String,

    /// URL or local filesystem path of the artifact
    #[serde(rename = "path")]
    pub locator: String,

    /// Digest algorithm name ("SHA1" or "SHA256", any case); may be absent
    /// for unverified local artifacts
    #[serde(default)]
    pub algorithm: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    /// Minimum Liquibase version; absent means unconstrained
    #[serde(
        rename = "liquibaseCore",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_host_version: Option<String>,
}

impl PackageVersion {
    pub fn new(tag: &str, locator: &str, algorithm: &str, checksum: &str) -> Self {
        Self {
            tag: tag.to_string(),
            locator: locator.to_string(),
            algorithm: algorithm.to_string(),
            checksum: Some(checksum.to_string()),
            min_host_version: None,
        }
    }

    pub fn with_min_host_version(mut self, min: &str) -> Self {
        self.min_host_version = Some(min.to_string());
        self
    }

    /// Last segment of the locator, with `/` and `\` both treated as separators
    pub fn artifact_filename(&self) -> &str {
        self.locator
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.locator)
    }

    pub fn is_remote(&self) -> bool {
        crate::package::fetcher::is_remote(&self.locator)
    }

    /// The expected digest, if one is present and non-blank
    pub fn expected_digest(&self) -> Option<&str> {
        self.checksum
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// The minimum Liquibase version string, if present and non-blank
    pub fn required_host(&self) -> Option<&str> {
        self.min_host_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn parsed_tag(&self) -> Option<Version> {
        Version::parse(&self.tag).ok()
    }

    /// Whether this version may run on `host`
    ///
    /// An unparsable minimum counts as incompatible.
    pub fn supports_host(&self, host: &Version) -> bool {
        match self.required_host() {
            None => true,
            Some(required) => match Version::parse(required) {
                Ok(required) => required <= *host,
                Err(_) => {
                    tracing::debug!(
                        "Ignoring version {} with malformed liquibaseCore '{}'",
                        self.tag,
                        required
                    );
                    false
                }
            },
        }
    }

    /// Whether this version's artifact is among `filenames`
    pub fn is_in(&self, filenames: &[String]) -> bool {
        let filename = self.artifact_filename();
        !filename.is_empty() && filenames.iter().any(|f| f == filename)
    }
}

/// A named package and all of its known versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub versions: Vec<PackageVersion>,
}

impl Package {
    pub fn new(name: &str, category: Category, versions: Vec<PackageVersion>) -> Self {
        Self {
            name: name.to_string(),
            category,
            versions,
        }
    }

    pub fn is_driver(&self) -> bool {
        self.category == Category::Driver
    }

    /// The highest version that can run on `host`
    ///
    /// Drivers ignore `host`. Versions with an unparsable tag are never
    /// selected, and for non-drivers neither are versions with an unparsable
    /// minimum. On equal versions the first one listed wins.
    pub fn latest_compatible(&self, host: &Version) -> Option<&PackageVersion> {
        let mut best: Option<(Version, &PackageVersion)> = None;

        for candidate in &self.versions {
            if !self.is_driver() && !candidate.supports_host(host) {
                continue;
            }

            let Some(parsed) = candidate.parsed_tag() else {
                tracing::debug!(
                    "Skipping {}@{}: tag is not a semantic version",
                    self.name,
                    candidate.tag
                );
                continue;
            };

            match &best {
                Some((current, _)) if parsed <= *current => {}
                _ => best = Some((parsed, candidate)),
            }
        }

        best.map(|(_, version)| version)
    }

    /// Exact tag lookup
    pub fn version(&self, tag: &str) -> Option<&PackageVersion> {
        self.versions.iter().find(|v| v.tag == tag)
    }

    /// The first listed version whose artifact is present in `filenames`
    pub fn installed_version(&self, filenames: &[String]) -> Option<&PackageVersion> {
        self.versions.iter().find(|v| v.is_in(filenames))
    }

    /// Every version whose artifact is present in `filenames`
    pub fn installed_versions(&self, filenames: &[String]) -> Vec<&PackageVersion> {
        self.versions.iter().filter(|v| v.is_in(filenames)).collect()
    }

    pub fn is_installed(&self, filenames: &[String]) -> bool {
        self.installed_version(filenames).is_some()
    }
}
