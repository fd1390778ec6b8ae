//! Single-turn model invocation shared by all strategies

use super::ClassifyError;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use triage_domain::{Model, StrategyRole};
use triage_domain::core::string::one_line_preview;

/// Sends one prompt to one model, under an optional timeout
///
/// Every call is recorded on the conversation logger as a
/// `strategy_response` event.
pub struct ModelInvoker<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
    timeout: Option<Duration>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> Clone for ModelInvoker<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            model: self.model.clone(),
            timeout: self.timeout,
            logger: Arc::clone(&self.logger),
        }
    }
}

impl<G: LlmGateway + 'static> ModelInvoker<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self {
            gateway,
            model,
            timeout: None,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Send `prompt` on behalf of `role` and return the raw reply
    pub async fn invoke(&self, role: StrategyRole, prompt: &str) -> Result<String, ClassifyError> {
        let call = self.send(prompt);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ClassifyError::Timeout {
                    role,
                    timeout: limit,
                })?,
            None => call.await,
        };

        let response = result.map_err(|source| ClassifyError::Gateway { role, source })?;
        debug!(
            "{} strategy replied: {}",
            role,
            one_line_preview(&response, 80)
        );
        self.logger.log(ConversationEvent::strategy_response(
            role,
            &self.model,
            prompt,
            &response,
        ));
        Ok(response)
    }

    async fn send(&self, prompt: &str) -> Result<String, GatewayError> {
        let session = self.gateway.create_session(&self.model).await?;
        session.send(prompt).await
    }
}
