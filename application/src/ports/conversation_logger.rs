//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording every prompt sent to
//! the model, every raw reply, and the verdict reached for each item.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! transcript in a machine-readable format (JSONL) for later audit.

use serde_json::{Value, json};
use triage_domain::{Model, StrategyRole, Verdict};

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields. The adapter adds the timestamp when writing.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// Event type identifier (`strategy_response`, `verdict`, `item_failed`).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// One collaborator call and its raw reply
    pub fn strategy_response(role: StrategyRole, model: &Model, prompt: &str, response: &str) -> Self {
        Self::new(
            "strategy_response",
            json!({
                "role": role.as_str(),
                "model": model.as_str(),
                "prompt": prompt,
                "response": response,
            }),
        )
    }

    /// The verdict reached for one dataset item
    pub fn verdict(id: &str, verdict: &Verdict, rule: Option<&str>) -> Self {
        Self::new(
            "verdict",
            json!({
                "id": id,
                "label": verdict.label(),
                "confidence": verdict.confidence(),
                "needs_human": verdict.needs_human(),
                "consensus_rule": rule,
            }),
        )
    }

    /// A dataset item skipped because a collaborator call failed
    pub fn item_failed(id: &str, error: &str) -> Self {
        Self::new("item_failed", json!({ "id": id, "error": error }))
    }
}

/// Port for logging conversation events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and infallible; write failures are the adapter's
/// problem and never interrupt classification.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_domain::ConfidenceTier;

    #[test]
    fn test_strategy_response_payload() {
        let event = ConversationEvent::strategy_response(
            StrategyRole::Primary,
            &Model::default(),
            "prompt text",
            "{\"call_type\": \"BILLING\"}",
        );
        assert_eq!(event.event_type, "strategy_response");
        assert_eq!(event.payload["role"], "primary");
        assert_eq!(event.payload["model"], "claude-3-7-sonnet-20250219");
        assert_eq!(event.payload["prompt"], "prompt text");
    }

    #[test]
    fn test_verdict_payload() {
        let verdict = Verdict::labeled("CLAIMS", ConfidenceTier::High);
        let event = ConversationEvent::verdict("7", &verdict, Some("agreement"));
        assert_eq!(event.payload["label"], "CLAIMS");
        assert_eq!(event.payload["confidence"], "high");
        assert_eq!(event.payload["needs_human"], false);
        assert_eq!(event.payload["consensus_rule"], "agreement");
    }

    #[test]
    fn test_item_failed_payload() {
        let event = ConversationEvent::item_failed("3", "Timeout");
        assert_eq!(event.event_type, "item_failed");
        assert_eq!(event.payload["error"], "Timeout");
    }
}
