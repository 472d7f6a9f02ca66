//! Session memory repository trait.
//!
//! Defines the interface for persisting the session store.

use super::store::SessionStore;
use crate::error::Result;
use crate::integrity::ContentDigest;

/// Result of reading the persisted memory.
///
/// Loading never fails: a missing file and a file that cannot be used both
/// lead to an empty store, but callers can still tell the cases apart.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The persisted memory was read and recognized.
    Loaded(SessionStore),
    /// Nothing is persisted yet (missing or blank file).
    Absent,
    /// Something is persisted but could not be read or recognized.
    Unreadable { reason: String },
}

impl LoadOutcome {
    /// The loaded store, or an empty one.
    pub fn into_store(self) -> SessionStore {
        match self {
            LoadOutcome::Loaded(store) => store,
            LoadOutcome::Absent | LoadOutcome::Unreadable { .. } => SessionStore::new(),
        }
    }

    /// Short label for logs and startup output.
    pub fn label(&self) -> &'static str {
        match self {
            LoadOutcome::Loaded(_) => "loaded",
            LoadOutcome::Absent => "absent",
            LoadOutcome::Unreadable { .. } => "unreadable",
        }
    }
}

/// An abstract repository for the session memory.
///
/// Decouples the session lifecycle from the storage format. Implementations
/// are used from a single thread; no locking is expected.
pub trait MemoryRepository: Send + Sync {
    /// Reads the persisted memory.
    fn load(&self) -> LoadOutcome;

    /// Persists the store and returns the digest recorded with it.
    ///
    /// The returned digest covers the persisted content and is what a later
    /// [`current_digest`](Self::current_digest) yields while the file stays
    /// untouched.
    fn save(&self, store: &SessionStore) -> Result<ContentDigest>;

    /// Digest of what is persisted right now, or `None` when nothing is.
    fn current_digest(&self) -> Option<ContentDigest>;
}
