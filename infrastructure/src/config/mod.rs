//! Configuration file loading for triage-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRIAGE_*` environment variables (`TRIAGE_EVALUATION__CONCURRENCY=4`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./triage.toml` or `./.triage.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/triage-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_CATEGORIES, FileAnthropicConfig, FileClassifierConfig,
    FileConfig, FileEvaluationConfig, FileLoggingConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;
