//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ClassifierConfig`]: what to classify into and how to ask the model
//! - [`EvaluationParams`]: batch loop control (timeouts, concurrency, limit)

pub mod classifier_config;
pub mod evaluation_params;

pub use classifier_config::ClassifierConfig;
pub use evaluation_params::EvaluationParams;
