//! Test doubles shared by the application tests

use crate::config::ClassifierConfig;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use triage_domain::{CategorySet, Model, PromptSet, PromptTemplate, StrategyRole};

/// What the scripted model does with one prompt
pub(crate) enum Reply {
    Text(String),
    Fail(GatewayError),
    /// Never answers within any test timeout
    Stall,
}

impl Reply {
    pub(crate) fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }
}

type Script = Arc<dyn Fn(&str) -> Reply + Send + Sync>;

/// Gateway whose replies are computed from the prompt
pub(crate) struct ScriptedGateway {
    script: Script,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGateway {
    pub(crate) fn new(script: impl Fn(&str) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            script: Arc::new(script),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, in arrival order
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            script: Arc::clone(&self.script),
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct ScriptedSession {
    model: Model,
    script: Script,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(content.to_string());
        match (self.script)(content) {
            Reply::Text(text) => Ok(text),
            Reply::Fail(err) => Err(err),
            Reply::Stall => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(GatewayError::Timeout)
            }
        }
    }
}

/// Logger that keeps every event in memory
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub(crate) fn events(&self) -> Vec<ConversationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Config whose prompts start with a role tag (`P|`, `B|`, `N|`, `L|`)
/// followed by `categories|input_text`, so scripts can tell strategies apart.
pub(crate) fn test_config() -> ClassifierConfig {
    let tagged = |role, tag: &str| {
        PromptTemplate::new(role, format!("{tag}|{{categories}}|{{input_text}}")).unwrap()
    };
    let prompts = PromptSet::default()
        .with(tagged(StrategyRole::Primary, "P"))
        .with(tagged(StrategyRole::Backup, "B"))
        .with(tagged(StrategyRole::NegativeCheck, "N"))
        .with(tagged(StrategyRole::Baseline, "L"));
    ClassifierConfig::new(CategorySet::new(["BILLING", "CLAIMS", "RESTORE"]).unwrap())
        .with_prompts(prompts)
}

/// Split a tagged prompt into (tag, input_text)
pub(crate) fn split_prompt(prompt: &str) -> (&str, &str) {
    let mut parts = prompt.splitn(3, '|');
    let tag = parts.next().unwrap_or_default();
    let _categories = parts.next();
    (tag, parts.next().unwrap_or_default())
}
