use crate::core::error::{LpmError, LpmResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version used for package tags and host versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release version (e.g., "alpha.1", "beta.2", "rc.1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<String>,
    /// Build metadata (e.g., "build.123")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_metadata: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
        }
    }

    /// Create a new version with pre-release metadata
    pub fn with_prerelease(major: u64, minor: u64, patch: u64, prerelease: String) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Some(prerelease),
            build_metadata: None,
        }
    }

    /// Parse a version string (e.g., "4.20.0", "1.0.0-beta.1", "1.0.0+build.7").
    ///
    /// Minor and patch default to 0 when omitted ("4.8" is 4.8.0). Every
    /// numeric component that is present must parse, and at most three are
    /// accepted, so "19.3.0.0" or "1.x" are rejected.
    pub fn parse(s: &str) -> LpmResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LpmError::Version("Empty version string".to_string()));
        }

        // Split by '+' to separate build metadata
        let (version_prerelease, build_metadata) = match s.split_once('+') {
            Some((head, build)) if !build.is_empty() => (head, Some(build.to_string())),
            Some(_) => {
                return Err(LpmError::Version(format!("Empty build metadata: {}", s)));
            }
            None => (s, None),
        };

        // The first '-' starts the pre-release (identifiers may contain '-')
        let (version_part, prerelease) = match version_prerelease.split_once('-') {
            Some((head, pre)) if !pre.is_empty() => (head, Some(pre.to_string())),
            Some(_) => {
                return Err(LpmError::Version(format!("Empty pre-release: {}", s)));
            }
            None => (version_prerelease, None),
        };

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() > 3 {
            return Err(LpmError::Version(format!(
                "Too many version components: {}",
                s
            )));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(parts.iter()) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(LpmError::Version(format!(
                    "Invalid version component '{}' in {}",
                    part, s
                )));
            }
            *slot = part
                .parse()
                .map_err(|_| LpmError::Version(format!("Version component too large: {}", s)))?;
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            prerelease,
            build_metadata,
        })
    }
}

impl FromStr for Version {
    type Err = LpmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

// Implement PartialEq and Eq manually to ignore build_metadata (per SemVer spec)
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.prerelease == other.prerelease
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => {
                // Pre-release versions have lower precedence than normal versions
                match (&self.prerelease, &other.prerelease) {
                    (None, None) => Ordering::Equal,
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(a), Some(b)) => compare_prerelease_identifiers(a, b),
                }
            }
            other => other,
        }
    }
}

/// Compare pre-release identifiers according to SemVer spec
fn compare_prerelease_identifiers(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();

    for (a_part, b_part) in a_parts.iter().zip(b_parts.iter()) {
        let ordering = match (a_part.parse::<u64>(), b_part.parse::<u64>()) {
            (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a_part.cmp(b_part),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    // If all parts are equal, longer pre-release is greater
    a_parts.len().cmp(&b_parts.len())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}
