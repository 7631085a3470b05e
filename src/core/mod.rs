//! Core data structures.
//!
//! - Target languages and the engine table
//! - The liblab config model
//! - The remote generation manifest

pub mod config;
pub mod engine;
pub mod language;
pub mod manifest;

pub use config::{
    ConfigError, LanguageOptions, LiblabConfig, Publishing, DEFAULT_LIBLAB_CONFIG_PATH,
};
pub use engine::{engine_for, is_generated_by, EngineVersions, LiblabVersion, SdkEngine};
pub use language::Language;
pub use manifest::{Manifest, MANIFEST_PATH};
