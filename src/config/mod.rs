use crate::core::path::{config_file, ensure_dir, LOCAL_CLASSPATH_DIR};
use crate::core::{LpmError, LpmResult};
use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where `lpm update` fetches the package catalog from by default
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Name of the project-local classpath directory
    #[serde(default = "default_local_classpath_dir")]
    pub local_classpath_dir: String,

    /// Liquibase installation to use instead of LIQUIBASE_HOME / PATH lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquibase_home: Option<PathBuf>,
}

fn default_catalog_url() -> String {
    "https://raw.githubusercontent.com/liquibase/liquibase-package-manager/master/internal/app/packages.json"
        .to_string()
}

fn default_local_classpath_dir() -> String {
    LOCAL_CLASSPATH_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            local_classpath_dir: default_local_classpath_dir(),
            liquibase_home: None,
        }
    }
}

impl Config {
    /// Load config from platform-specific config directory, creating default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\lpm\config.yaml
    /// - Linux: ~/.config/lpm/config.yaml
    /// - macOS: ~/Library/Application Support/lpm/config.yaml
    pub fn load() -> LpmResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from an explicit path, writing defaults there if it is missing
    pub fn load_from(config_path: &Path) -> LpmResult<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| LpmError::Config(format!("Failed to parse config: {}", e)))?;

        if config.local_classpath_dir.trim().is_empty() {
            return Err(LpmError::Config(
                "local_classpath_dir must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    /// Save config to platform-specific config directory
    pub fn save(&self) -> LpmResult<()> {
        self.save_to(&config_file()?)
    }

    fn save_to(&self, config_path: &Path) -> LpmResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| LpmError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| LpmError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, content)?;
        Ok(())
    }
}

impl ConfigProvider for Config {
    fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    fn local_classpath_dir(&self) -> &str {
        &self.local_classpath_dir
    }

    fn liquibase_home(&self) -> Option<&Path> {
        self.liquibase_home.as_deref()
    }
}
