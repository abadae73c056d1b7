//! # Feed Engine Configuration
//!
//! Configuration loading and logging setup for the feed normalization engine.
//!
//! ## Features
//!
//! - **Engine Settings**: default conflation, update-as-trade processing
//! - **Schema Sources**: dictionary file, inline field entries, field aliases
//! - **Logging**: `tracing-subscriber` setup with env-filter and JSON output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use feed_config::{init_tracing, EngineConfig};
//! use std::path::Path;
//!
//! let config = EngineConfig::load(Path::new("config/engine.toml"), Some("production"))?;
//! init_tracing(&config.logging)?;
//! let entries = config.schema.dictionary_entries()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod engine_config;
pub mod logging;

pub use engine_config::{
    EngineConfig, EngineSettings, FieldAlias, FieldEntry, LoggingConfig, SchemaConfig,
};
pub use logging::{env_filter, init_tracing};
