use crate::core::{LpmError, LpmResult, Version};
use crate::di::HostDetector;
use crate::host::HostInfo;
use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

const HOME_ENV: &str = "LIQUIBASE_HOME";
const BUILD_PROPERTIES_ENTRY: &str = "liquibase.build.properties";
const BUILD_VERSION_KEY: &str = "build.version";

/// Archives that carry the build properties, in lookup order
const HOST_ARCHIVES: &[&str] = &[
    "liquibase.jar",
    "internal/lib/liquibase-core.jar",
    "internal/lib/liquibase-commercial.jar",
];

/// Finds the Liquibase installation and reads its version
///
/// Lookup order: configured home, `LIQUIBASE_HOME`, then the `liquibase`
/// executable on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct LiquibaseDetector {
    configured_home: Option<PathBuf>,
}

impl LiquibaseDetector {
    pub fn new(configured_home: Option<PathBuf>) -> Self {
        Self { configured_home }
    }

    /// Read the installation rooted at `home`
    pub fn detect_from_path(&self, home: &Path) -> LpmResult<HostInfo> {
        if !home.is_dir() {
            return Err(LpmError::HostNotFound(format!(
                "Path does not exist: {}",
                home.display()
            )));
        }

        let home = fs::canonicalize(home).unwrap_or_else(|_| home.to_path_buf());
        tracing::debug!("Reading Liquibase installation at {}", home.display());

        let Some(archive) = find_archive(&home) else {
            tracing::warn!(
                "No Liquibase jar found under {}; assuming version 0.0.0",
                home.display()
            );
            return Ok(HostInfo::new(home, Version::new(0, 0, 0)));
        };

        let build_properties = read_build_properties(&archive);
        let raw = build_properties
            .get(BUILD_VERSION_KEY)
            .map(String::as_str)
            .unwrap_or("0.0.0");

        let version = Version::parse(raw).unwrap_or_else(|_| {
            tracing::warn!(
                "Error parsing version '{}'. Falling back to version '0.0.0'.",
                raw
            );
            Version::new(0, 0, 0)
        });

        Ok(HostInfo {
            home,
            version,
            build_properties,
        })
    }

    fn locate_home(&self) -> LpmResult<PathBuf> {
        if let Some(configured) = &self.configured_home {
            tracing::debug!("Using configured liquibase_home {}", configured.display());
            return Ok(configured.clone());
        }

        if let Ok(home) = env::var(HOME_ENV) {
            let home = PathBuf::from(home.trim());
            if !home.as_os_str().is_empty() && home.is_dir() {
                tracing::debug!("Using {}={}", HOME_ENV, home.display());
                return Ok(home);
            }
        }

        home_from_path().ok_or_else(|| {
            LpmError::HostNotFound(format!(
                "Set {} or add the liquibase executable to PATH.",
                HOME_ENV
            ))
        })
    }
}

impl HostDetector for LiquibaseDetector {
    fn detect(&self) -> LpmResult<HostInfo> {
        let home = self.locate_home()?;
        self.detect_from_path(&home)
    }
}

/// Installation directory of the `liquibase` executable on PATH
fn home_from_path() -> Option<PathBuf> {
    let executable = which::which("liquibase").ok()?;
    let resolved = fs::canonicalize(&executable).unwrap_or(executable);
    tracing::debug!("Found liquibase executable at {}", resolved.display());
    home_of_executable(&resolved)
}

/// Parent directory of `executable`, stepping out of a trailing `bin`
fn home_of_executable(executable: &Path) -> Option<PathBuf> {
    let parent = executable.parent()?;
    if parent.file_name().is_some_and(|name| name == "bin") {
        return parent.parent().map(Path::to_path_buf);
    }
    Some(parent.to_path_buf())
}

fn find_archive(home: &Path) -> Option<PathBuf> {
    HOST_ARCHIVES
        .iter()
        .map(|relative| home.join(relative))
        .find(|candidate| candidate.is_file())
}

/// `key=value` lines of the build properties entry; empty if unreadable
fn read_build_properties(archive: &Path) -> BTreeMap<String, String> {
    match read_properties_entry(archive) {
        Ok(Some(content)) => parse_properties(&content),
        Ok(None) => BTreeMap::new(),
        Err(e) => {
            tracing::warn!("Could not read JAR properties from {}: {}", archive.display(), e);
            BTreeMap::new()
        }
    }
}

fn read_properties_entry(archive: &Path) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;

    let mut entry = match zip.by_name(BUILD_PROPERTIES_ENTRY) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(Some(content))
}

fn parse_properties(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}
