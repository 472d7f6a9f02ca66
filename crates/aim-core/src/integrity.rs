//! Content digests of the persisted memory and out-of-band change detection.
//!
//! The digest is a SHA-256 over exact bytes. It exists to notice that the
//! memory file changed between runs (hand edits, restored backups, a second
//! console instance), not to protect it.

use sha2::{Digest, Sha256};
use std::fmt;

/// Shortest digest prefix the console will display.
pub const MIN_DISPLAY_LENGTH: usize = 4;

/// Digest prefix length used when nothing is configured.
pub const DEFAULT_DISPLAY_LENGTH: usize = 12;

/// A full-length hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Digests the given bytes.
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// The full 64-char hex digest.
    pub fn full(&self) -> &str {
        &self.0
    }

    /// A display prefix of at least [`MIN_DISPLAY_LENGTH`] chars.
    pub fn short(&self, length: usize) -> &str {
        let length = length.max(MIN_DISPLAY_LENGTH).min(self.0.len());
        &self.0[..length]
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when the persisted memory no longer matches the digest recorded
/// at the last save. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub previous: String,
    pub current: String,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "memory hash changed since last run")
    }
}

/// Compares the previously recorded digest with the current one.
///
/// Returns a warning only when `previous` is non-empty and differs from
/// `current`. An empty `current` (nothing on disk) is not a change.
pub fn detect_change(previous: &str, current: &str) -> Option<IntegrityWarning> {
    if previous.is_empty() || current.is_empty() || previous == current {
        return None;
    }
    Some(IntegrityWarning {
        previous: previous.to_string(),
        current: current.to_string(),
    })
}
