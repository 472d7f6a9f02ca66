pub mod config_service;
pub mod dto;
pub mod export;
pub mod json_memory_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::export::MarkdownExporter;
pub use crate::json_memory_repository::JsonMemoryRepository;
pub use crate::paths::AimPaths;
