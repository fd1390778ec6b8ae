//! Baseline single-pass strategy

use super::{ClassificationStrategy, ClassifyError, ModelInvoker};
use crate::config::ClassifierConfig;
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use triage_domain::{CategorySet, PromptTemplate, StrategyRole, parse_baseline};

/// One call, "respond with just the category name"
///
/// Used as a reference point for the consensus classifier.
pub struct BaselineStrategy<G: LlmGateway + 'static> {
    invoker: ModelInvoker<G>,
    template: PromptTemplate,
    categories: CategorySet,
}

impl<G: LlmGateway + 'static> BaselineStrategy<G> {
    pub fn new(invoker: ModelInvoker<G>, config: &ClassifierConfig) -> Self {
        Self {
            invoker,
            template: config.prompts.baseline.clone(),
            categories: config.categories.clone(),
        }
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> ClassificationStrategy for BaselineStrategy<G> {
    type Output = Option<String>;

    fn role(&self) -> StrategyRole {
        StrategyRole::Baseline
    }

    async fn run(&self, input_text: &str) -> Result<Option<String>, ClassifyError> {
        let prompt = self.template.render(&self.categories, input_text);
        let response = self.invoker.invoke(StrategyRole::Baseline, &prompt).await?;
        Ok(parse_baseline(&response, &self.categories))
    }
}
