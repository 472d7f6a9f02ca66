//! Data Transfer Objects for the persisted memory format.
//!
//! DTOs mirror the on-disk JSON exactly; conversions to and from the domain
//! types live next to them.

mod memory;

pub use memory::{MemoryDocument, SessionEntry};
