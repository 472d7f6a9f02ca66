//! Session lifecycle management.
//!
//! `SessionManager` is the explicit context object for one console process:
//! it owns the store, the running turn index and the configuration, and
//! drives every transition of the lifecycle:
//!
//! ```text
//! INIT -> LOADED -> (per turn: APPENDED -> SAVED -> DIGESTED) ... -> TERMINATED
//! ```
//!
//! Persistence failures never escape: they are logged and the console keeps
//! running on the in-memory state.

use super::model::{InteractionRecord, format_timestamp};
use super::repository::{LoadOutcome, MemoryRepository};
use super::store::SessionStore;
use crate::alignment;
use crate::config::AimConfig;
use crate::integrity::{ContentDigest, IntegrityWarning, detect_change};
use crate::reply::ReplyGenerator;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Where the manager is in the per-process lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Memory loaded (or started empty); nothing written yet.
    Loaded,
    /// A record was appended but the last save failed.
    Appended,
    /// The store was written, but reading it back gave a different digest.
    Saved,
    /// The store was written and reads back with the recorded digest.
    Digested,
    /// The final save ran; the manager must not be used for more turns.
    Terminated,
}

/// What happened while opening the session.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    /// "loaded", "absent" or "unreadable".
    pub source: &'static str,
    /// Number of records available after loading.
    pub records: usize,
    /// Set when the persisted memory changed since the last recorded save.
    pub integrity_warning: Option<IntegrityWarning>,
}

/// The outcome of one conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Turn index used for the alignment drift.
    pub turn_index: u64,
    /// Unrounded alignment value (the record holds the rounded one).
    pub alignment: f64,
    /// The record appended to the store.
    pub record: InteractionRecord,
    /// Records evicted from the front to respect `max_records`.
    pub evicted: usize,
    /// Digest of the saved memory, if the save succeeded.
    pub digest: Option<ContentDigest>,
}

/// Owns the session memory for the lifetime of a console process.
pub struct SessionManager {
    repository: Arc<dyn MemoryRepository>,
    replies: Arc<dyn ReplyGenerator>,
    config: AimConfig,
    store: SessionStore,
    turn_index: u64,
    phase: SessionPhase,
}

impl SessionManager {
    /// Loads the memory and checks it against the digest recorded at the
    /// last save.
    pub fn open(
        repository: Arc<dyn MemoryRepository>,
        replies: Arc<dyn ReplyGenerator>,
        config: AimConfig,
    ) -> (Self, StartupReport) {
        let outcome = repository.load();
        let source = outcome.label();
        match &outcome {
            LoadOutcome::Unreadable { reason } => {
                tracing::warn!("Starting with empty memory, persisted memory unusable: {}", reason);
            }
            _ => tracing::debug!("Session memory {}", source),
        }
        let store = outcome.into_store();

        let current = repository
            .current_digest()
            .map(|digest| digest.full().to_string())
            .unwrap_or_default();
        let integrity_warning = detect_change(store.last_digest(), &current);
        if let Some(warning) = &integrity_warning {
            tracing::info!(
                previous = %warning.previous,
                current = %warning.current,
                "Persisted memory changed outside the console"
            );
        }

        let report = StartupReport {
            source,
            records: store.len(),
            integrity_warning,
        };

        let manager = Self {
            repository,
            replies,
            config,
            turn_index: store.len() as u64,
            store,
            phase: SessionPhase::Loaded,
        };

        (manager, report)
    }

    /// Records a conversational turn at the current time.
    pub fn record_turn(&mut self, user_text: &str) -> TurnReport {
        self.record_turn_at(user_text, Utc::now())
    }

    /// Records a conversational turn with an explicit timestamp.
    ///
    /// `user_text` must already be sanitized and trimmed by the caller.
    pub fn record_turn_at(&mut self, user_text: &str, now: DateTime<Utc>) -> TurnReport {
        self.turn_index += 1;
        let alignment = alignment::compute(user_text, self.turn_index);
        let reply = self.replies.reply(user_text, Some(alignment));
        let record = InteractionRecord::new(format_timestamp(now), user_text, reply, alignment);

        let evicted = self.store.append(record.clone(), self.config.max_records);
        self.phase = SessionPhase::Appended;
        if evicted > 0 {
            tracing::debug!("Pruned {} oldest record(s)", evicted);
        }

        let digest = self.persist();

        TurnReport {
            turn_index: self.turn_index,
            alignment,
            record,
            evicted,
            digest,
        }
    }

    /// Erases the memory and persists the empty store.
    ///
    /// Confirmation is the caller's job.
    pub fn clear(&mut self) -> Option<ContentDigest> {
        self.store.clear();
        self.turn_index = 0;
        tracing::info!("Session memory cleared");
        self.persist()
    }

    /// Digest of the memory as it is on disk right now.
    pub fn current_digest(&self) -> Option<ContentDigest> {
        self.repository.current_digest()
    }

    /// Runs the final save. Later calls are no-ops.
    pub fn shutdown(&mut self) -> Option<ContentDigest> {
        if self.phase == SessionPhase::Terminated {
            return None;
        }
        let digest = self.persist();
        self.phase = SessionPhase::Terminated;
        tracing::debug!("Session terminated");
        digest
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    pub fn turn_index(&self) -> u64 {
        self.turn_index
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn persist(&mut self) -> Option<ContentDigest> {
        let digest = match self.repository.save(&self.store) {
            Ok(digest) => digest,
            Err(e) => {
                tracing::warn!("Failed to save session memory: {}", e);
                return None;
            }
        };
        self.phase = SessionPhase::Saved;
        self.store.set_last_digest(digest.full());

        // The digest only counts once the persisted memory reads back with it.
        match self.repository.current_digest() {
            Some(current) if current == digest => {
                self.phase = SessionPhase::Digested;
                Some(digest)
            }
            current => {
                tracing::warn!(
                    expected = %digest,
                    found = current.as_ref().map_or("none", |d| d.full()),
                    "Saved memory does not read back with its digest"
                );
                None
            }
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        if self.phase != SessionPhase::Terminated {
            self.shutdown();
        }
    }
}
