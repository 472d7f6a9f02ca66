//! Configuration service implementation.
//!
//! Loads the optional `config.json`:
//!
//! ```json
//! { "max_sessions": 50, "hash_length": 12 }
//! ```
//!
//! A missing or broken file means defaults. Each field is validated on its
//! own, so one bad value never discards a good one.

use aim_core::config::AimConfig;
use aim_core::error::{AimError, Result};
use aim_core::integrity::MIN_DISPLAY_LENGTH;
use serde_json::Value as JsonValue;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Loads [`AimConfig`] once at startup.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, falling back to defaults silently.
    pub fn load(&self) -> AimConfig {
        match self.read_value() {
            Ok(Some(value)) => Self::from_value(&value),
            Ok(None) => AimConfig::default(),
            Err(e) => {
                tracing::debug!("Ignoring config file {:?}: {}", self.path, e);
                AimConfig::default()
            }
        }
    }

    /// Builds a configuration from a parsed JSON value, field by field.
    pub fn from_value(value: &JsonValue) -> AimConfig {
        let mut config = AimConfig::default();
        let Some(object) = value.as_object() else {
            tracing::debug!("Config root is not an object; using defaults");
            return config;
        };

        if let Some(raw) = object.get("max_sessions") {
            match as_integer(raw).and_then(|n| usize::try_from(n).ok()).and_then(NonZeroUsize::new) {
                Some(max) => config.max_records = max,
                None => tracing::debug!("Ignoring invalid max_sessions: {}", raw),
            }
        }

        if let Some(raw) = object.get("hash_length") {
            match as_integer(raw) {
                Some(n) => {
                    config.digest_display_length =
                        usize::try_from(n).unwrap_or(0).max(MIN_DISPLAY_LENGTH);
                }
                None => tracing::debug!("Ignoring invalid hash_length: {}", raw),
            }
        }

        config
    }

    fn read_value(&self) -> Result<Option<JsonValue>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_str(&content)
            .map_err(|e| AimError::config(format!("invalid JSON: {}", e)))?;
        Ok(Some(value))
    }
}

/// Accepts integers, floats (truncated toward zero) and numeric strings.
fn as_integer(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
