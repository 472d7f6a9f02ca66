//! Session memory domain module.
//!
//! # Module Structure
//!
//! - `model`: the stored interaction record (`InteractionRecord`)
//! - `store`: the bounded, ordered in-memory log (`SessionStore`)
//! - `repository`: persistence interface (`MemoryRepository`, `LoadOutcome`)
//! - `manager`: per-process lifecycle context (`SessionManager`)

mod manager;
mod model;
mod repository;
mod store;

pub use manager::{SessionManager, SessionPhase, StartupReport, TurnReport};
pub use model::{InteractionRecord, current_utc_timestamp, format_timestamp, round_alignment};
pub use repository::{LoadOutcome, MemoryRepository};
pub use store::SessionStore;
