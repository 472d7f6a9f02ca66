//! Path management for the console's files.
//!
//! Everything lives in one data directory:
//!
//! ```text
//! <data dir>/
//! ├── memory.json      # session memory
//! ├── config.json      # optional settings
//! └── aim_export.md    # markdown export
//! ```

use std::path::{Path, PathBuf};

pub const MEMORY_FILE_NAME: &str = "memory.json";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const EXPORT_FILE_NAME: &str = "aim_export.md";

/// Resolved locations of the console's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AimPaths {
    base_dir: PathBuf,
}

impl AimPaths {
    /// Uses `base_dir` when given, otherwise the current working directory.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        let base_dir = base_dir
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn memory_file(&self) -> PathBuf {
        self.base_dir.join(MEMORY_FILE_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE_NAME)
    }

    pub fn export_file(&self) -> PathBuf {
        self.base_dir.join(EXPORT_FILE_NAME)
    }
}
