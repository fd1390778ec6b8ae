//! Evaluation configuration from TOML (`[evaluation]` section)

use serde::{Deserialize, Serialize};
use triage_application::EvaluationParams;
use triage_domain::{ConfigIssue, ConfigIssueCode};

/// Raw evaluation loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluationConfig {
    /// Timeout for each model call, in seconds
    pub timeout_seconds: u64,
    /// Run the three strategy calls of an item concurrently
    pub parallel_strategies: bool,
    /// Dataset items in flight at once
    pub concurrency: usize,
    /// Evaluate only the first N items
    pub limit: Option<usize>,
}

impl Default for FileEvaluationConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 60,
            parallel_strategies: true,
            concurrency: 1,
            limit: None,
        }
    }
}

impl FileEvaluationConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEvaluationSetting,
                "evaluation.timeout_seconds cannot be 0",
            ));
        }
        if self.concurrency == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEvaluationSetting,
                "evaluation.concurrency must be at least 1",
            ));
        }
        issues
    }

    pub fn to_params(&self) -> EvaluationParams {
        EvaluationParams::default()
            .with_timeout_seconds(self.timeout_seconds)
            .with_parallel_strategies(self.parallel_strategies)
            .with_concurrency(self.concurrency)
            .with_limit(self.limit)
    }
}
