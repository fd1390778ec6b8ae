//! Classification strategies
//!
//! Each strategy wraps one prompt template and one response-interpretation
//! rule, and calls the model exactly once per input:
//!
//! | Strategy | Output | Interpretation |
//! |----------|--------|----------------|
//! | [`LabelExtractor`] (Primary / Backup) | [`Opinion`](triage_domain::Opinion) | strict JSON, else first category mentioned |
//! | [`NegativeChecker`] | [`NegativeCheck`](triage_domain::NegativeCheck) | yes / no, fail-open |
//! | [`BaselineStrategy`] | `Option<String>` | first category mentioned |
//!
//! Collaborator failures surface as [`ClassifyError`]; strategies never retry
//! or swallow them.

mod baseline;
mod invoker;
mod label_extractor;
mod negative_checker;

pub use baseline::BaselineStrategy;
pub use invoker::ModelInvoker;
pub use label_extractor::LabelExtractor;
pub use negative_checker::NegativeChecker;

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use triage_domain::StrategyRole;

/// Errors raised while classifying one input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("{role} strategy failed: {source}")]
    Gateway {
        role: StrategyRole,
        #[source]
        source: GatewayError,
    },

    #[error("{role} strategy timed out after {}s", .timeout.as_secs_f64())]
    Timeout { role: StrategyRole, timeout: Duration },
}

impl ClassifyError {
    /// The strategy whose call failed
    pub fn role(&self) -> StrategyRole {
        match self {
            ClassifyError::Gateway { role, .. } | ClassifyError::Timeout { role, .. } => *role,
        }
    }
}

/// One classification strategy
///
/// Implementations are injected into the classifiers as trait objects, so a
/// caller can replace any single strategy without touching the others.
#[async_trait]
pub trait ClassificationStrategy: Send + Sync {
    type Output: Send;

    /// Which slot this strategy fills
    fn role(&self) -> StrategyRole;

    /// Classify `input_text`, calling the model once
    async fn run(&self, input_text: &str) -> Result<Self::Output, ClassifyError>;
}
