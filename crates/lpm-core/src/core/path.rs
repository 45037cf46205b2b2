use crate::core::error::{LpmError, LpmResult};
use std::path::{Path, PathBuf};

/// Default name of the project-local classpath directory.
pub const LOCAL_CLASSPATH_DIR: &str = "liquibase_libs";

/// File name of the dependency manifest kept in the project root.
pub const DEPENDENCY_MANIFEST_FILE: &str = "liquibase.json";

/// File name of the package catalog kept in the classpath directory.
pub const CATALOG_FILE: &str = "packages.json";

/// Get the LPM home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\lpm
/// - Linux: ~/.config/lpm
/// - macOS: ~/Library/Application Support/lpm
pub fn lpm_home() -> LpmResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| LpmError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("lpm"))
}

/// Get the config file path (`<lpm home>/config.yaml`)
pub fn config_file() -> LpmResult<PathBuf> {
    Ok(lpm_home()?.join("config.yaml"))
}

/// Get the local classpath directory for a project (`<root>/<dir_name>`)
pub fn local_classpath_dir(project_root: &Path, dir_name: &str) -> PathBuf {
    project_root.join(dir_name)
}

/// Get the dependency manifest path for a project (`<root>/liquibase.json`)
pub fn dependency_manifest_file(project_root: &Path) -> PathBuf {
    project_root.join(DEPENDENCY_MANIFEST_FILE)
}

/// Ensure a directory exists, creating it and its parents if needed
pub fn ensure_dir(path: &Path) -> LpmResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| LpmError::store(path, e))?;
    }
    Ok(())
}
