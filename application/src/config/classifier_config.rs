//! Classifier configuration.
//!
//! Everything a classifier needs to be built, resolved once. The category set
//! is shared by reference with every strategy and the schema validator.

use triage_domain::{CategorySet, Model, PromptSet};

/// Default structured key the strict parse reads the label from
pub const DEFAULT_LABEL_FIELD: &str = "call_type";

/// Classifier construction parameters.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Closed label vocabulary.
    pub categories: CategorySet,
    /// Model every strategy talks to.
    pub model: Model,
    /// Key holding the label in a structured reply.
    pub label_field: String,
    /// Prompt per strategy.
    pub prompts: PromptSet,
}

impl ClassifierConfig {
    pub fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            model: Model::default(),
            label_field: DEFAULT_LABEL_FIELD.to_string(),
            prompts: PromptSet::default(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = field.into();
        self
    }

    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = prompts;
        self
    }
}
