//! Negative-Check strategy

use super::{ClassificationStrategy, ClassifyError, ModelInvoker};
use crate::config::ClassifierConfig;
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use triage_domain::{CategorySet, NegativeCheck, PromptTemplate, StrategyRole, parse_negative_check};

/// Asks whether the input is classifiable at all
pub struct NegativeChecker<G: LlmGateway + 'static> {
    invoker: ModelInvoker<G>,
    template: PromptTemplate,
    categories: CategorySet,
}

impl<G: LlmGateway + 'static> NegativeChecker<G> {
    pub fn new(invoker: ModelInvoker<G>, config: &ClassifierConfig) -> Self {
        Self {
            invoker,
            template: config.prompts.negative.clone(),
            categories: config.categories.clone(),
        }
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> ClassificationStrategy for NegativeChecker<G> {
    type Output = NegativeCheck;

    fn role(&self) -> StrategyRole {
        StrategyRole::NegativeCheck
    }

    async fn run(&self, input_text: &str) -> Result<NegativeCheck, ClassifyError> {
        let prompt = self.template.render(&self.categories, input_text);
        let response = self
            .invoker
            .invoke(StrategyRole::NegativeCheck, &prompt)
            .await?;
        Ok(parse_negative_check(&response))
    }
}
