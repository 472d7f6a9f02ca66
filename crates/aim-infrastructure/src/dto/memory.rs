//! Memory file DTOs.
//!
//! ```json
//! {
//!   "sessions": [
//!     { "ts": "2024-05-01T12:00:01Z", "user": "...", "ai": "...", "align": -0.3163 }
//!   ],
//!   "last_hash": "..."
//! }
//! ```

use aim_core::session::{InteractionRecord, SessionStore};
use serde::{Deserialize, Serialize};

/// One stored interaction as it appears in `memory.json`.
///
/// Missing fields fall back to defaults so that hand-edited entries still
/// load; fields of the wrong type make the whole document unrecognized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionEntry {
    /// ISO 8601 UTC timestamp
    #[serde(default)]
    pub ts: String,
    /// Sanitized user input
    #[serde(default)]
    pub user: String,
    /// Console reply
    #[serde(default)]
    pub ai: String,
    /// Alignment lane value, 4 decimals
    #[serde(default)]
    pub align: f64,
}

/// The whole persisted memory document.
///
/// Field order here is the key order on disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryDocument {
    /// Interaction log, oldest first. Required: a document without it is
    /// not a memory file.
    pub sessions: Vec<SessionEntry>,
    /// Digest recorded at the last save
    #[serde(default)]
    pub last_hash: String,
}

impl MemoryDocument {
    /// The same document with `last_hash` blanked: the exact form whose bytes
    /// are digested when sealing.
    pub fn unsealed(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            last_hash: String::new(),
        }
    }

    /// Convert DTO to domain model
    pub fn into_domain(self) -> SessionStore {
        let records = self.sessions.into_iter().map(InteractionRecord::from).collect();
        SessionStore::from_parts(records, self.last_hash)
    }
}

impl From<&SessionStore> for MemoryDocument {
    fn from(store: &SessionStore) -> Self {
        Self {
            sessions: store.records().iter().map(SessionEntry::from).collect(),
            last_hash: store.last_digest().to_string(),
        }
    }
}

impl From<&InteractionRecord> for SessionEntry {
    fn from(record: &InteractionRecord) -> Self {
        Self {
            ts: record.timestamp.clone(),
            user: record.user_text.clone(),
            ai: record.reply_text.clone(),
            align: record.alignment,
        }
    }
}

impl From<SessionEntry> for InteractionRecord {
    fn from(entry: SessionEntry) -> Self {
        InteractionRecord::new(entry.ts, entry.user, entry.ai, entry.align)
    }
}
