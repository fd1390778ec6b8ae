//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into application types goes
//! through the `parse_*` / `to_*` methods, which report [`ConfigIssue`]s
//! instead of failing on the first problem.

mod classifier;
mod evaluation;
mod logging;
mod providers;

pub use classifier::{DEFAULT_CATEGORIES, FileClassifierConfig};
pub use evaluation::FileEvaluationConfig;
pub use logging::FileLoggingConfig;
pub use providers::{FileAnthropicConfig, FileProvidersConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use triage_domain::ConfigIssue;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", join_messages(.0))]
    Invalid(Vec<ConfigIssue>),
}

impl ConfigValidationError {
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            ConfigValidationError::Invalid(issues) => issues,
        }
    }
}

fn join_messages(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Categories, model and prompts
    pub classifier: FileClassifierConfig,
    /// Batch loop settings
    pub evaluation: FileEvaluationConfig,
    /// Provider settings
    pub providers: FileProvidersConfig,
    /// Conversation audit log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Credentials are not checked here; commands that talk to the provider
    /// resolve the API key themselves.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.classifier.validate());
        issues.extend(self.evaluation.validate());
        issues.extend(self.providers.anthropic.validate());
        issues
    }

    /// Validate and split the issues: warnings are returned, errors fail.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }
}
