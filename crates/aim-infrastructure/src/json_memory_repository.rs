//! JSON file-backed MemoryRepository implementation.

use crate::dto::MemoryDocument;
use crate::storage::{AtomicJsonError, AtomicJsonFile, to_pretty_bytes};
use aim_core::error::Result;
use aim_core::integrity::ContentDigest;
use aim_core::session::{LoadOutcome, MemoryRepository, SessionStore};
use std::path::{Path, PathBuf};

/// Stores the session memory as a single pretty-printed JSON document.
///
/// The digest written to `last_hash` is "sealed": it covers the exact bytes
/// of the document serialized with `last_hash` empty. Reading the file back
/// and repeating that serialization reproduces the same bytes as long as
/// nobody changed the content, which is what change detection relies on.
/// Edits that only change formatting (whitespace, key order) are therefore
/// not detected, and unknown keys do not survive the next save.
pub struct JsonMemoryRepository {
    file: AtomicJsonFile<MemoryDocument>,
}

impl JsonMemoryRepository {
    /// Creates a repository for the memory file at `path`.
    ///
    /// Nothing is read or created until the first load or save.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn seal(document: &MemoryDocument) -> std::result::Result<ContentDigest, AtomicJsonError> {
        let bytes = to_pretty_bytes(&document.unsealed())?;
        Ok(ContentDigest::of(&bytes))
    }
}

impl MemoryRepository for JsonMemoryRepository {
    fn load(&self) -> LoadOutcome {
        match self.file.load() {
            Ok(Some(document)) => {
                tracing::debug!(
                    "Loaded {} session(s) from {:?}",
                    document.sessions.len(),
                    self.path()
                );
                LoadOutcome::Loaded(document.into_domain())
            }
            Ok(None) => LoadOutcome::Absent,
            Err(e) => LoadOutcome::Unreadable {
                reason: e.to_string(),
            },
        }
    }

    fn save(&self, store: &SessionStore) -> Result<ContentDigest> {
        let mut document = MemoryDocument::from(store);
        let digest = Self::seal(&document)?;
        document.last_hash = digest.full().to_string();

        self.file.save(&document)?;
        tracing::debug!("Saved {} session(s) to {:?}", document.sessions.len(), self.path());

        Ok(digest)
    }

    fn current_digest(&self) -> Option<ContentDigest> {
        let bytes = match self.file.read_bytes() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {:?} for digest: {}", self.path(), e);
                return None;
            }
        };

        // Files we cannot parse are digested as-is.
        serde_json::from_slice::<MemoryDocument>(&bytes)
            .ok()
            .and_then(|document| Self::seal(&document).ok())
            .or_else(|| Some(ContentDigest::of(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_core::session::InteractionRecord;
    use std::fs;
    use tempfile::TempDir;

    fn sample_store() -> SessionStore {
        SessionStore::from_parts(
            vec![
                InteractionRecord::new("2024-05-01T12:00:01Z", "hello", "Thank you.", -0.2913),
                InteractionRecord::new("2024-05-01T12:00:09Z", "a plan?", "Steps.", -0.3163),
            ],
            "",
        )
    }

    #[test]
    fn test_load_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonMemoryRepository::new(temp_dir.path().join("memory.json"));

        assert_eq!(repo.load(), LoadOutcome::Absent);
        assert!(repo.current_digest().is_none());
    }

    #[test]
    fn test_load_empty_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        fs::write(&path, "").unwrap();
        let repo = JsonMemoryRepository::new(path);

        assert_eq!(repo.load(), LoadOutcome::Absent);
    }

    #[test]
    fn test_load_invalid_json_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        fs::write(&path, "{\"sessions\": [").unwrap();
        let repo = JsonMemoryRepository::new(path);

        let outcome = repo.load();
        assert!(matches!(outcome, LoadOutcome::Unreadable { .. }));
        assert!(outcome.into_store().is_empty());
    }

    #[test]
    fn test_load_unrecognized_structure_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        fs::write(&path, "{\"notes\": []}").unwrap();
        let repo = JsonMemoryRepository::new(path);

        assert!(matches!(repo.load(), LoadOutcome::Unreadable { .. }));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonMemoryRepository::new(temp_dir.path().join("memory.json"));
        let store = sample_store();

        let digest = repo.save(&store).unwrap();

        let loaded = repo.load().into_store();
        assert_eq!(loaded.records(), store.records());
        assert_eq!(loaded.last_digest(), digest.full());
    }

    #[test]
    fn test_saved_file_is_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        let repo = JsonMemoryRepository::new(path.clone());

        let digest = repo.save(&sample_store()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"sessions\": [\n    {\n      \"ts\": "));
        assert!(content.contains("\"align\": -0.3163"));
        assert!(content.ends_with(&format!("\"last_hash\": \"{}\"\n}}", digest.full())));
    }

    #[test]
    fn test_current_digest_matches_saved_digest() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonMemoryRepository::new(temp_dir.path().join("memory.json"));

        let digest = repo.save(&sample_store()).unwrap();

        assert_eq!(repo.current_digest(), Some(digest));
    }

    #[test]
    fn test_digest_ignores_previous_last_hash() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonMemoryRepository::new(temp_dir.path().join("memory.json"));
        let mut store = sample_store();

        let first = repo.save(&store).unwrap();
        store.set_last_digest("something else");
        let second = repo.save(&store).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_hand_edit_changes_current_digest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        let repo = JsonMemoryRepository::new(path.clone());
        let digest = repo.save(&sample_store()).unwrap();

        let edited = fs::read_to_string(&path).unwrap().replace("hello", "goodbye");
        fs::write(&path, edited).unwrap();

        let current = repo.current_digest().unwrap();
        assert_ne!(current, digest);
        // The stored last_hash still carries the old digest.
        assert_eq!(repo.load().into_store().last_digest(), digest.full());
    }

    #[test]
    fn test_formatting_only_edit_keeps_digest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        let repo = JsonMemoryRepository::new(path.clone());
        let digest = repo.save(&sample_store()).unwrap();

        let reformatted = fs::read_to_string(&path).unwrap().replace("\n", "\n\n");
        fs::write(&path, reformatted).unwrap();

        assert_eq!(repo.current_digest(), Some(digest));
    }

    #[test]
    fn test_corrupt_file_is_digested_raw() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        fs::write(&path, "not json").unwrap();
        let repo = JsonMemoryRepository::new(path);

        assert_eq!(repo.current_digest(), Some(ContentDigest::of(b"not json")));
    }

    #[test]
    fn test_save_into_missing_directory_creates_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("memory.json");
        let repo = JsonMemoryRepository::new(path.clone());

        repo.save(&SessionStore::new()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = temp_dir.path().join("memory.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let repo = JsonMemoryRepository::new(path);

        let err = repo.save(&sample_store()).unwrap_err();
        assert!(err.is_io());
    }
}
