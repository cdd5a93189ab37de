//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for scoring,
//! assembly, catalog, conversation window and remote backend, `AppPaths`
//! for cross-platform directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, AssemblyConfig, BackendConfig, CatalogConfig, ConversationConfig, ScoringConfig,
    Tone,
};
