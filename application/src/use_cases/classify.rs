//! Classify use case
//!
//! Turns one input text into a [`Verdict`] plus the intermediate opinions
//! that produced it.
//!
//! # Flow (consensus)
//!
//! ```text
//! input_text
//!   ├─ Primary  ──┐
//!   ├─ Backup   ──┼─ (join) ─ validate(primary) ─ ConsensusEngine::decide ─ Verdict
//!   └─ Negative ──┘
//! ```
//!
//! The three calls run concurrently or one after another (Primary, Backup,
//! Negative-Check). Either way the engine only runs once all three are in.
//! Any failed call fails the whole classification.

use crate::config::ClassifierConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::strategies::{
    BaselineStrategy, ClassificationStrategy, ClassifyError, LabelExtractor, ModelInvoker,
    NegativeChecker,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use triage_domain::{
    ConsensusEngine, ConsensusRule, NegativeCheck, Opinion, SchemaValidator, StrategyRole, Verdict,
};

/// Intermediate results behind a verdict
///
/// Field names match the `debug` block of the evaluation report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationDebug {
    pub primary_label: Option<String>,
    pub backup_label: Option<String>,
    pub negative_check: Option<NegativeCheck>,
    pub validation_result: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus_rule: Option<ConsensusRule>,
}

/// A verdict and how it was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub debug: ClassificationDebug,
}

/// Anything that can classify one input
#[async_trait]
pub trait Classify: Send + Sync {
    /// Strategy this classifier is known by in logs
    fn name(&self) -> &'static str;

    async fn classify(&self, input_text: &str) -> Result<Classification, ClassifyError>;
}

type OpinionStrategy = Arc<dyn ClassificationStrategy<Output = Opinion>>;
type NegativeStrategy = Arc<dyn ClassificationStrategy<Output = NegativeCheck>>;

/// Caller-supplied replacements for individual strategies
///
/// Unset slots get the standard strategy built from [`ClassifierConfig`].
#[derive(Default, Clone)]
pub struct StrategyOverrides {
    pub primary: Option<OpinionStrategy>,
    pub backup: Option<OpinionStrategy>,
    pub negative: Option<NegativeStrategy>,
}

/// Three strategies, one schema check, one consensus decision
pub struct ConsensusClassifier {
    primary: OpinionStrategy,
    backup: OpinionStrategy,
    negative: NegativeStrategy,
    validator: SchemaValidator,
    parallel: bool,
}

impl ConsensusClassifier {
    /// Build the standard classifier, with strategies run concurrently
    pub fn new<G: LlmGateway + 'static>(invoker: ModelInvoker<G>, config: &ClassifierConfig) -> Self {
        Self::with_overrides(invoker, config, StrategyOverrides::default())
    }

    /// Build a classifier, filling unset override slots with the standard strategies
    pub fn with_overrides<G: LlmGateway + 'static>(
        invoker: ModelInvoker<G>,
        config: &ClassifierConfig,
        overrides: StrategyOverrides,
    ) -> Self {
        let primary = overrides
            .primary
            .unwrap_or_else(|| Arc::new(LabelExtractor::primary(invoker.clone(), config)));
        let backup = overrides
            .backup
            .unwrap_or_else(|| Arc::new(LabelExtractor::backup(invoker.clone(), config)));
        let negative = overrides
            .negative
            .unwrap_or_else(|| Arc::new(NegativeChecker::new(invoker, config)));

        Self {
            primary,
            backup,
            negative,
            validator: SchemaValidator::new(config.categories.clone()),
            parallel: true,
        }
    }

    /// Issue the strategy calls concurrently (`true`) or in sequence
    pub fn with_parallel_strategies(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    async fn gather(&self, input_text: &str) -> Result<(Opinion, Opinion, NegativeCheck), ClassifyError> {
        if self.parallel {
            let (primary, backup, negative) = tokio::join!(
                self.primary.run(input_text),
                self.backup.run(input_text),
                self.negative.run(input_text),
            );
            Ok((primary?, backup?, negative?))
        } else {
            let primary = self.primary.run(input_text).await?;
            let backup = self.backup.run(input_text).await?;
            let negative = self.negative.run(input_text).await?;
            Ok((primary, backup, negative))
        }
    }
}

#[async_trait]
impl Classify for ConsensusClassifier {
    fn name(&self) -> &'static str {
        "consensus"
    }

    async fn classify(&self, input_text: &str) -> Result<Classification, ClassifyError> {
        let (primary, backup, negative) = self.gather(input_text).await?;

        let primary_is_valid = self.validator.validate(&primary);
        let decision = ConsensusEngine::decide(&primary, &backup, negative, primary_is_valid);

        debug!(
            "primary={:?} ({}) backup={:?} negative={} valid={} -> rule {} {}",
            primary.label(),
            primary.shape().as_str(),
            backup.label(),
            negative,
            primary_is_valid,
            decision.rule.priority(),
            decision.rule
        );

        Ok(Classification {
            verdict: decision.verdict,
            debug: ClassificationDebug {
                primary_label: primary.label().map(str::to_string),
                backup_label: backup.label().map(str::to_string),
                negative_check: Some(negative),
                validation_result: Some(primary_is_valid),
                consensus_rule: Some(decision.rule),
            },
        })
    }
}

/// Single-call classifier without confidence tiers
///
/// Its verdicts carry no tier and need review exactly when no category was
/// recognised in the reply.
pub struct BaselineClassifier {
    strategy: Arc<dyn ClassificationStrategy<Output = Option<String>>>,
}

impl BaselineClassifier {
    pub fn new<G: LlmGateway + 'static>(invoker: ModelInvoker<G>, config: &ClassifierConfig) -> Self {
        Self::from_strategy(Arc::new(BaselineStrategy::new(invoker, config)))
    }

    pub fn from_strategy(strategy: Arc<dyn ClassificationStrategy<Output = Option<String>>>) -> Self {
        Self { strategy }
    }
}

#[async_trait]
impl Classify for BaselineClassifier {
    fn name(&self) -> &'static str {
        StrategyRole::Baseline.as_str()
    }

    async fn classify(&self, input_text: &str) -> Result<Classification, ClassifyError> {
        let label = self.strategy.run(input_text).await?;
        debug!("baseline -> {:?}", label);

        Ok(Classification {
            verdict: Verdict::unrated(label.clone()),
            debug: ClassificationDebug {
                primary_label: label,
                ..ClassificationDebug::default()
            },
        })
    }
}
