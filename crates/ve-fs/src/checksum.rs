//! SHA-256 checksum utilities
//!
//! Checksums use the canonical format `sha256:<hex>`. Expected values may
//! also be given as bare hex, which is how most download pages publish them.

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of raw bytes.
pub fn compute_bytes_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(compute_bytes_checksum(&content))
}

/// Bring an expected checksum into canonical form.
///
/// Accepts `sha256:<hex>` or bare hex, in any case.
pub fn canonicalize(expected: &str) -> String {
    let trimmed = expected.trim();
    let hex = trimmed.strip_prefix(PREFIX).unwrap_or(trimmed);
    format!("{}{}", PREFIX, hex.to_ascii_lowercase())
}

/// Compare an actual checksum against an expected one.
pub fn matches(expected: &str, actual: &str) -> bool {
    canonicalize(expected) == canonicalize(actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_checksum_known_value() {
        assert_eq!(
            compute_bytes_checksum(b"hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn file_checksum_matches_bytes_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ez_setup.py");
        std::fs::write(&path, "hello world").unwrap();

        assert_eq!(
            compute_file_checksum(&path).unwrap(),
            compute_bytes_checksum(b"hello world")
        );
    }

    #[test]
    fn bare_and_uppercase_hex_are_accepted() {
        let actual = compute_bytes_checksum(b"hello world");
        assert!(matches(
            "B94D27B9934D3E08A52E52D7DA7DABFAC484EFE37A5380EE9088F7ACE2EFCDE9",
            &actual
        ));
        assert!(matches(&actual, &actual));
        assert!(!matches("sha256:00", &actual));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = compute_file_checksum(&dir.path().join("missing"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
