//! Shared types, error model, and configuration for Lokalize.
//!
//! This crate is the foundation depended on by all other Lokalize crates.
//! It provides:
//! - [`LokalizeError`] — the unified error type
//! - Domain types ([`Document`], [`Chunk`], [`QueryResult`], [`LocalizationRequest`])
//! - Cultural profiles ([`CulturalProfile`] and the built-in set)
//! - Configuration ([`AppConfig`], [`ServiceMode`], config loading)

pub mod config;
pub mod error;
pub mod profiles;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ChunkingConfig, DefaultsConfig, ServiceConfig, ServiceMode, SourcesConfig,
    config_dir, config_file_path, init_config, load_config, load_config_from,
    resolve_service_mode,
};
pub use error::{LokalizeError, Result};
pub use profiles::{CulturalProfile, GuidanceNote, builtin_profiles, find_profile};
pub use types::{Backend, Chunk, Document, LocalizationRequest, QueryResult, RetrievedChunk};
