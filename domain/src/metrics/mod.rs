//! Evaluation metrics
//!
//! - [`aggregator`]: batch reduction of verdicts against ground truth
//! - [`report`]: the resulting report types

pub mod aggregator;
pub mod report;

pub use aggregator::{EvaluationRecord, MetricsAggregator, aggregate};
pub use report::{
    CategoryMetrics, ConfidenceMetrics, HumanReviewMetrics, MetricsReport, TierBucket,
    TierMetrics,
};
