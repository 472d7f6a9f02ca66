//! Domain core of the AIM mini console.
//!
//! - [`alignment`]: the bounded alignment lane computed per turn
//! - [`session`]: interaction records, the bounded store and its lifecycle
//! - [`integrity`]: content digests and change detection for the memory file
//! - [`reply`]: deterministic keyword replies
//! - [`text`]: input sanitizing
//! - [`config`]: startup settings

pub mod alignment;
pub mod config;
pub mod error;
pub mod integrity;
pub mod reply;
pub mod session;
pub mod text;

// Re-export common error type
pub use error::{AimError, Result};

pub use config::AimConfig;
pub use integrity::{ContentDigest, IntegrityWarning};
pub use session::{InteractionRecord, LoadOutcome, MemoryRepository, SessionManager, SessionStore};
