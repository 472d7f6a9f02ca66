//! Console configuration model.

use crate::integrity::{DEFAULT_DISPLAY_LENGTH, MIN_DISPLAY_LENGTH};
use std::num::NonZeroUsize;

/// Records kept in memory when nothing is configured.
pub const DEFAULT_MAX_RECORDS: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

/// Settings read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimConfig {
    /// Upper bound on stored interaction records; oldest are evicted first.
    pub max_records: NonZeroUsize,
    /// Number of hex chars shown for short digests (at least 4).
    pub digest_display_length: usize,
}

impl AimConfig {
    pub fn new(max_records: NonZeroUsize, digest_display_length: usize) -> Self {
        Self {
            max_records,
            digest_display_length: digest_display_length.max(MIN_DISPLAY_LENGTH),
        }
    }
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            digest_display_length: DEFAULT_DISPLAY_LENGTH,
        }
    }
}
