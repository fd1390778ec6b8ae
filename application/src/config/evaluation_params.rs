//! Evaluation parameters: batch loop control.
//!
//! [`EvaluationParams`] groups the static parameters that control the
//! evaluation loop in [`RunEvaluationUseCase`](crate::use_cases::run_evaluation::RunEvaluationUseCase)
//! and the per-call behaviour of the classifiers it drives.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Evaluation loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationParams {
    /// Timeout applied to each collaborator call separately, not to the item.
    /// With sequential strategies one item may take up to three times this
    /// long. `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
    /// Issue the three strategy calls of one item concurrently.
    pub parallel_strategies: bool,
    /// Dataset items in flight at once. Results keep dataset order.
    pub concurrency: usize,
    /// Evaluate only the first N items.
    pub limit: Option<usize>,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            call_timeout: Some(Duration::from_secs(60)),
            parallel_strategies: true,
            concurrency: 1,
            limit: None,
        }
    }
}

impl EvaluationParams {
    // ==================== Builder Methods ====================

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Creates a timeout from seconds; `0` disables it.
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        let timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self.with_call_timeout(timeout)
    }

    pub fn with_parallel_strategies(mut self, parallel: bool) -> Self {
        self.parallel_strategies = parallel;
        self
    }

    /// Items in flight; clamped to at least 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}
