use std::path::PathBuf;
use thiserror::Error;

pub type LpmResult<T> = Result<T, LpmError>;

#[derive(Error, Debug)]
pub enum LpmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Invalid package specification: {0}")]
    InvalidSpec(String),

    #[error("Package '{name}' not found.")]
    PackageNotFound { name: String },

    #[error("Version '{tag}' not found for package '{name}'.")]
    VersionNotFound { name: String, tag: String },

    /// No version of the package can run on the detected host, or the
    /// selected version requires a newer host than the one installed.
    #[error("{}", incompatible_message(.name, .version.as_deref(), .required.as_deref(), .installed))]
    VersionIncompatible {
        name: String,
        version: Option<String>,
        required: Option<String>,
        installed: String,
    },

    #[error("Checksum validation failed for '{label}'. Expected: {expected}, Got: {actual}")]
    ChecksumMismatch {
        label: String,
        expected: String,
        actual: String,
    },

    #[error("Unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to download from '{locator}'. HTTP status: {status}")]
    FetchStatus { locator: String, status: u16 },

    #[error("Failed to download from '{locator}': {cause}")]
    FetchFailed { locator: String, cause: String },

    #[error("Package '{name}' is already installed (version {installed_tag}).")]
    AlreadyInstalled { name: String, installed_tag: String },

    #[error("Package '{name}' is not installed.")]
    PackageNotInstalled { name: String },

    /// Catalog or dependency manifest could not be read, parsed or written.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// The classpath directory could not be created, listed or written.
    #[error("Classpath error at {}: {message}", .path.display())]
    Store { path: PathBuf, message: String },

    #[error("Unable to locate Liquibase installation. {0}")]
    HostNotFound(String),
}

fn incompatible_message(
    name: &str,
    version: Option<&str>,
    required: Option<&str>,
    installed: &str,
) -> String {
    match (version, required) {
        (Some(version), Some(required)) => format!(
            "Package '{}@{}' requires Liquibase {} or higher, but installed version is {}.",
            name, version, required, installed
        ),
        (Some(version), None) => format!(
            "Package '{}@{}' is not compatible with installed Liquibase {}.",
            name, version, installed
        ),
        _ => format!(
            "Package '{}' has no version compatible with installed Liquibase {}.",
            name, installed
        ),
    }
}

impl LpmError {
    /// Build a `Store` error for a failing classpath path.
    pub fn store(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        LpmError::Store {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
