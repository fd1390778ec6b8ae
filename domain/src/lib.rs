//! Domain layer for triage-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Quorum classification
//!
//! Each input is judged by three independent strategies:
//!
//! - **Primary**: direct structured extraction of a label
//! - **Backup**: step-by-step reasoning that ends in a label
//! - **Negative-Check**: a yes/no judgement on whether the input is classifiable
//!
//! The [`ConsensusEngine`] folds those three opinions into a [`Verdict`]
//! carrying a label, a [`ConfidenceTier`], and a human-review flag.
//!
//! ## Evaluation
//!
//! The [`MetricsAggregator`] scores verdicts against ground truth: overall
//! accuracy, one-vs-rest precision / recall / F1 per category, accuracy per
//! confidence tier, and the human-review share.

pub mod category;
pub mod classification;
pub mod config;
pub mod core;
pub mod metrics;
pub mod prompt;
pub mod quorum;

// Re-export commonly used types
pub use category::CategorySet;
pub use classification::{
    ConfidenceTier, NegativeCheck, Opinion, OpinionShape, StrategyRole, Verdict,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use metrics::{
    CategoryMetrics, ConfidenceMetrics, EvaluationRecord, HumanReviewMetrics, MetricsAggregator,
    MetricsReport, TierBucket, TierMetrics,
};
pub use prompt::{PromptSet, PromptTemplate};

// Re-export quorum types
pub use quorum::{
    ConsensusDecision, ConsensusEngine, ConsensusRule, SchemaValidator, parse_baseline,
    parse_negative_check, parse_opinion,
};
