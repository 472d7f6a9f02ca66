//! The bounded session log.

use super::model::InteractionRecord;
use std::num::NonZeroUsize;

/// Ordered log of interaction records, oldest first, plus the digest
/// recorded at the last successful save.
///
/// After any [`append`](Self::append) the log holds at most `max_records`
/// entries; eviction is FIFO and never reorders the survivors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    records: Vec<InteractionRecord>,
    last_digest: String,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted parts, as-is.
    pub fn from_parts(records: Vec<InteractionRecord>, last_digest: impl Into<String>) -> Self {
        Self {
            records,
            last_digest: last_digest.into(),
        }
    }

    /// All records in chronological order.
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    /// The newest `count` records, still oldest first.
    pub fn recent(&self, count: usize) -> &[InteractionRecord] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Digest recorded at the last save, or empty if unknown.
    pub fn last_digest(&self) -> &str {
        &self.last_digest
    }

    pub fn set_last_digest(&mut self, digest: impl Into<String>) {
        self.last_digest = digest.into();
    }

    /// Appends a record and evicts the oldest ones beyond `max_records`.
    ///
    /// Returns how many records were evicted.
    pub fn append(&mut self, record: InteractionRecord, max_records: NonZeroUsize) -> usize {
        self.records.push(record);
        let overflow = self.records.len().saturating_sub(max_records.get());
        if overflow > 0 {
            self.records.drain(..overflow);
        }
        overflow
    }

    /// Drops every record and forgets the last digest.
    pub fn clear(&mut self) {
        self.records.clear();
        self.last_digest.clear();
    }
}
