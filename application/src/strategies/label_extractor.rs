//! Primary and Backup strategies

use super::{ClassificationStrategy, ClassifyError, ModelInvoker};
use crate::config::ClassifierConfig;
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use triage_domain::{CategorySet, Opinion, PromptTemplate, StrategyRole, parse_opinion};

/// Asks the model for a label and reads it back as an [`Opinion`]
///
/// Primary and Backup differ only in their prompt: Primary asks for the
/// structured answer directly, Backup asks the model to reason first.
pub struct LabelExtractor<G: LlmGateway + 'static> {
    invoker: ModelInvoker<G>,
    role: StrategyRole,
    template: PromptTemplate,
    categories: CategorySet,
    label_field: String,
}

impl<G: LlmGateway + 'static> LabelExtractor<G> {
    pub fn primary(invoker: ModelInvoker<G>, config: &ClassifierConfig) -> Self {
        Self::with_role(invoker, config, StrategyRole::Primary)
    }

    pub fn backup(invoker: ModelInvoker<G>, config: &ClassifierConfig) -> Self {
        Self::with_role(invoker, config, StrategyRole::Backup)
    }

    fn with_role(invoker: ModelInvoker<G>, config: &ClassifierConfig, role: StrategyRole) -> Self {
        Self {
            invoker,
            role,
            template: config.prompts.get(role).clone(),
            categories: config.categories.clone(),
            label_field: config.label_field.clone(),
        }
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> ClassificationStrategy for LabelExtractor<G> {
    type Output = Opinion;

    fn role(&self) -> StrategyRole {
        self.role
    }

    async fn run(&self, input_text: &str) -> Result<Opinion, ClassifyError> {
        let prompt = self.template.render(&self.categories, input_text);
        let response = self.invoker.invoke(self.role, &prompt).await?;
        Ok(parse_opinion(&response, &self.categories, &self.label_field))
    }
}
