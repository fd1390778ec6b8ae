//! Application layer for triage-quorum
//!
//! This crate contains use cases, port definitions, strategies and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod strategies;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{ClassifierConfig, EvaluationParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{EvaluationProgress, NoProgress},
};
pub use strategies::{
    BaselineStrategy, ClassificationStrategy, ClassifyError, LabelExtractor, ModelInvoker,
    NegativeChecker,
};
pub use use_cases::classify::{
    BaselineClassifier, Classification, ClassificationDebug, Classify, ConsensusClassifier,
    StrategyOverrides,
};
pub use use_cases::run_evaluation::{
    EvaluationItem, EvaluationReport, ItemFailure, ItemResult, RunEvaluationError,
    RunEvaluationInput, RunEvaluationUseCase,
};
