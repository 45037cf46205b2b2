use crate::core::{LpmError, LpmResult};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Digest algorithms a catalog entry may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha256,
}

impl FromStr for ChecksumAlgorithm {
    type Err = LpmError;

    /// Case-insensitive: "SHA1", "sha1", "SHA256", "Sha256".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHA1" => Ok(ChecksumAlgorithm::Sha1),
            "SHA256" => Ok(ChecksumAlgorithm::Sha256),
            _ => Err(LpmError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumAlgorithm::Sha1 => write!(f, "SHA1"),
            ChecksumAlgorithm::Sha256 => write!(f, "SHA256"),
        }
    }
}

/// Computes and checks artifact digests
pub struct ChecksumVerifier;

impl ChecksumVerifier {
    /// Lowercase hex digest of `data`
    pub fn digest(data: &[u8], algorithm: &str) -> LpmResult<String> {
        let algorithm: ChecksumAlgorithm = algorithm.parse()?;
        Ok(Self::digest_with(data, algorithm))
    }

    pub fn digest_with(data: &[u8], algorithm: ChecksumAlgorithm) -> String {
        match algorithm {
            ChecksumAlgorithm::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
            ChecksumAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
        }
    }

    /// Check `data` against `expected`, case-insensitively.
    ///
    /// `expected` is trimmed and cut to the computed digest's length first:
    /// some registries append a file name or other text after the hex digest.
    pub fn verify(data: &[u8], expected: &str, algorithm: &str) -> LpmResult<bool> {
        let actual = Self::digest(data, algorithm)?;
        let expected = normalize_expected(expected, actual.len());
        Ok(actual.eq_ignore_ascii_case(expected))
    }

    /// Like [`verify`](Self::verify), but a mismatch is a `ChecksumMismatch` error
    pub fn verify_or_fail(data: &[u8], expected: &str, algorithm: &str, label: &str) -> LpmResult<()> {
        let actual = Self::digest(data, algorithm)?;
        let normalized = normalize_expected(expected, actual.len());

        if !actual.eq_ignore_ascii_case(normalized) {
            return Err(LpmError::ChecksumMismatch {
                label: label.to_string(),
                expected: normalized.to_string(),
                actual,
            });
        }

        tracing::debug!("Checksum verified for {}", label);
        Ok(())
    }
}

fn normalize_expected(expected: &str, len: usize) -> &str {
    let trimmed = expected.trim();
    // Hex digests are ASCII; a non-boundary cut means the prefix cannot match anyway
    match trimmed.get(..len) {
        Some(prefix) => prefix,
        None if trimmed.len() > len => "",
        None => trimmed,
    }
}
