//! Run Evaluation use case
//!
//! Classifies every item of a labeled dataset, scores the verdicts against
//! ground truth, and assembles the report.
//!
//! A failed item (any collaborator error or timeout) is recorded under
//! `failures` and left out of `results` and of every metric denominator.
//! The batch itself always completes.

use crate::config::EvaluationParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::progress::{EvaluationProgress, NoProgress};
use crate::use_cases::classify::{Classification, ClassificationDebug, Classify};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use triage_domain::{
    CategorySet, ConfidenceTier, EvaluationRecord, MetricsAggregator, MetricsReport, Verdict,
};

/// Errors that can occur before an evaluation starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunEvaluationError {
    #[error("Concurrency must be at least 1")]
    InvalidConcurrency,
}

/// One labeled dataset entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationItem {
    pub id: String,
    pub customer_input: String,
    pub ground_truth: String,
}

impl EvaluationItem {
    pub fn new(
        id: impl Into<String>,
        customer_input: impl Into<String>,
        ground_truth: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            customer_input: customer_input.into(),
            ground_truth: ground_truth.into(),
        }
    }
}

/// One row of the report's `results`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    pub id: String,
    pub customer_input: String,
    pub actual_type: String,
    pub call_type: Option<String>,
    pub confidence: Option<ConfidenceTier>,
    pub needs_human: bool,
    pub correct: bool,
    pub debug: ClassificationDebug,
}

impl ItemResult {
    fn new(item: EvaluationItem, classification: Classification) -> Self {
        let Classification { verdict, debug } = classification;
        let correct = verdict.matches(&item.ground_truth);
        Self {
            id: item.id,
            customer_input: item.customer_input,
            actual_type: item.ground_truth,
            call_type: verdict.label().map(str::to_string),
            confidence: verdict.confidence(),
            needs_human: verdict.needs_human(),
            correct,
            debug,
        }
    }

    /// The verdict as stored in this row
    pub fn verdict(&self) -> Verdict {
        Verdict::from_parts(self.call_type.clone(), self.confidence, self.needs_human)
    }

    pub fn to_record(&self) -> EvaluationRecord {
        EvaluationRecord::new(&self.customer_input, &self.actual_type, self.verdict())
    }
}

/// An item skipped because classification failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub id: String,
    pub error: String,
}

/// The persisted outcome of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub results: Vec<ItemResult>,
    pub metrics: MetricsReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ItemFailure>,
}

impl EvaluationReport {
    /// Score the stored results again, against `categories`
    pub fn recompute_metrics(&self, categories: &CategorySet) -> MetricsReport {
        let records: Vec<EvaluationRecord> = self.results.iter().map(ItemResult::to_record).collect();
        triage_domain::metrics::aggregate(&records, categories)
    }
}

/// Input for the RunEvaluation use case
#[derive(Debug, Clone)]
pub struct RunEvaluationInput {
    pub items: Vec<EvaluationItem>,
    pub params: EvaluationParams,
}

impl RunEvaluationInput {
    pub fn new(items: Vec<EvaluationItem>) -> Self {
        Self {
            items,
            params: EvaluationParams::default(),
        }
    }

    pub fn with_params(mut self, params: EvaluationParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for evaluating a classifier over a labeled dataset
pub struct RunEvaluationUseCase {
    classifier: Arc<dyn Classify>,
    aggregator: MetricsAggregator,
    logger: Arc<dyn ConversationLogger>,
}

impl RunEvaluationUseCase {
    pub fn new(classifier: Arc<dyn Classify>, categories: CategorySet) -> Self {
        Self {
            classifier,
            aggregator: MetricsAggregator::new(categories),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunEvaluationInput,
    ) -> Result<EvaluationReport, RunEvaluationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunEvaluationInput,
        progress: &dyn EvaluationProgress,
    ) -> Result<EvaluationReport, RunEvaluationError> {
        let RunEvaluationInput { items, params } = input;
        if params.concurrency == 0 {
            return Err(RunEvaluationError::InvalidConcurrency);
        }

        let items: Vec<EvaluationItem> = match params.limit {
            Some(limit) => items.into_iter().take(limit).collect(),
            None => items,
        };

        info!(
            "Evaluating {} items with the {} classifier (concurrency {})",
            items.len(),
            self.classifier.name(),
            params.concurrency
        );
        progress.on_evaluation_start(items.len());

        let classifier = &self.classifier;
        let outcomes: Vec<_> = stream::iter(items)
            .map(|item| async move {
                let outcome = classifier.classify(&item.customer_input).await;
                match &outcome {
                    Ok(c) => progress.on_item_complete(&item.id, c.verdict.matches(&item.ground_truth)),
                    Err(e) => progress.on_item_failed(&item.id, &e.to_string()),
                }
                (item, outcome)
            })
            .buffered(params.concurrency)
            .collect()
            .await;

        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();

        for (item, outcome) in outcomes {
            match outcome {
                Ok(classification) => {
                    let rule = classification.debug.consensus_rule.map(|r| r.as_str());
                    debug!("Item {} -> {:?}", item.id, classification.verdict);
                    self.logger.log(ConversationEvent::verdict(
                        &item.id,
                        &classification.verdict,
                        rule,
                    ));
                    results.push(ItemResult::new(item, classification));
                }
                Err(e) => {
                    warn!("Skipping item {}: {}", item.id, e);
                    let error = e.to_string();
                    self.logger
                        .log(ConversationEvent::item_failed(&item.id, &error));
                    failures.push(ItemFailure { id: item.id, error });
                }
            }
        }

        let records: Vec<EvaluationRecord> = results.iter().map(ItemResult::to_record).collect();
        let metrics = self.aggregator.aggregate(&records);

        info!(
            "Evaluation finished: {} scored, {} failed, accuracy {:.2}",
            results.len(),
            failures.len(),
            metrics.overall_accuracy
        );
        progress.on_evaluation_complete(results.len(), failures.len());

        Ok(EvaluationReport {
            results,
            metrics,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::strategies::{ClassifyError, ModelInvoker};
    use crate::testing::{RecordingLogger, Reply, ScriptedGateway, split_prompt, test_config};
    use crate::use_cases::classify::ConsensusClassifier;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use triage_domain::{Model, StrategyRole};

    /// Classifier answering from a fixed table keyed by input text
    struct TableClassifier {
        table: HashMap<&'static str, Result<Verdict, ClassifyError>>,
        delays: HashMap<&'static str, u64>,
    }

    impl TableClassifier {
        fn new(entries: Vec<(&'static str, Result<Verdict, ClassifyError>)>) -> Self {
            Self {
                table: entries.into_iter().collect(),
                delays: HashMap::new(),
            }
        }

        fn with_delay(mut self, input: &'static str, millis: u64) -> Self {
            self.delays.insert(input, millis);
            self
        }
    }

    #[async_trait]
    impl Classify for TableClassifier {
        fn name(&self) -> &'static str {
            "table"
        }

        async fn classify(&self, input_text: &str) -> Result<Classification, ClassifyError> {
            if let Some(ms) = self.delays.get(input_text) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            let verdict = self
                .table
                .get(input_text)
                .cloned()
                .unwrap_or_else(|| Ok(Verdict::needs_review()))?;
            Ok(Classification {
                verdict,
                debug: ClassificationDebug::default(),
            })
        }
    }

    fn categories() -> CategorySet {
        CategorySet::new(["BILLING", "CLAIMS", "RESTORE"]).unwrap()
    }

    fn timeout_error() -> ClassifyError {
        ClassifyError::Timeout {
            role: StrategyRole::Primary,
            timeout: Duration::from_secs(1),
        }
    }

    #[derive(Default)]
    struct CountingProgress {
        events: Mutex<Vec<String>>,
    }

    impl EvaluationProgress for CountingProgress {
        fn on_evaluation_start(&self, total: usize) {
            self.events.lock().unwrap().push(format!("start {total}"));
        }
        fn on_item_complete(&self, id: &str, correct: bool) {
            self.events.lock().unwrap().push(format!("ok {id} {correct}"));
        }
        fn on_item_failed(&self, id: &str, _error: &str) {
            self.events.lock().unwrap().push(format!("fail {id}"));
        }
        fn on_evaluation_complete(&self, succeeded: usize, failed: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {succeeded} {failed}"));
        }
    }

    #[tokio::test]
    async fn test_failed_items_are_skipped() {
        let classifier = TableClassifier::new(vec![
            ("bill", Ok(Verdict::labeled("BILLING", ConfidenceTier::High))),
            ("stuck", Err(timeout_error())),
            ("fence", Ok(Verdict::labeled("BILLING", ConfidenceTier::Medium))),
        ]);
        let use_case = RunEvaluationUseCase::new(Arc::new(classifier), categories());
        let input = RunEvaluationInput::new(vec![
            EvaluationItem::new("1", "bill", "BILLING"),
            EvaluationItem::new("2", "stuck", "RESTORE"),
            EvaluationItem::new("3", "fence", "CLAIMS"),
        ]);

        let progress = CountingProgress::default();
        let report = use_case.execute_with_progress(input, &progress).await.unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, "2");
        assert!(report.failures[0].error.contains("timed out"));

        assert_eq!(report.metrics.total, 2);
        assert_eq!(report.metrics.correct, 1);
        assert_eq!(report.metrics.overall_accuracy, 0.5);
        // The failed RESTORE item must not count as a missed RESTORE
        assert_eq!(report.metrics.category("RESTORE").unwrap().count, 0);

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events.first().map(String::as_str), Some("start 3"));
        assert_eq!(events.last().map(String::as_str), Some("done 2 1"));
        assert!(events.contains(&"fail 2".to_string()));
        assert!(events.contains(&"ok 1 true".to_string()));
    }

    #[tokio::test]
    async fn test_result_rows() {
        let classifier = TableClassifier::new(vec![
            ("bill", Ok(Verdict::labeled("BILLING", ConfidenceTier::High))),
        ]);
        let use_case = RunEvaluationUseCase::new(Arc::new(classifier), categories());
        let report = use_case
            .execute(RunEvaluationInput::new(vec![
                EvaluationItem::new("a", "bill", "BILLING"),
                EvaluationItem::new("b", "mystery", "CLAIMS"),
            ]))
            .await
            .unwrap();

        let hit = &report.results[0];
        assert_eq!(hit.actual_type, "BILLING");
        assert_eq!(hit.call_type.as_deref(), Some("BILLING"));
        assert_eq!(hit.confidence, Some(ConfidenceTier::High));
        assert!(hit.correct);

        let miss = &report.results[1];
        assert_eq!(miss.call_type, None);
        assert!(miss.needs_human);
        assert!(!miss.correct);
        assert_eq!(report.metrics.human_review.count, 1);
    }

    #[tokio::test]
    async fn test_limit_takes_first_items() {
        let classifier = TableClassifier::new(vec![]);
        let use_case = RunEvaluationUseCase::new(Arc::new(classifier), categories());
        let items = (1..=5)
            .map(|i| EvaluationItem::new(i.to_string(), "x", "BILLING"))
            .collect();
        let report = use_case
            .execute(
                RunEvaluationInput::new(items)
                    .with_params(EvaluationParams::default().with_limit(Some(2))),
            )
            .await
            .unwrap();

        let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_concurrent_results_keep_dataset_order() {
        let classifier = TableClassifier::new(vec![
            ("slow", Ok(Verdict::labeled("BILLING", ConfidenceTier::High))),
            ("fast", Ok(Verdict::labeled("CLAIMS", ConfidenceTier::High))),
        ])
        .with_delay("slow", 50);
        let use_case = RunEvaluationUseCase::new(Arc::new(classifier), categories());
        let input = RunEvaluationInput::new(vec![
            EvaluationItem::new("1", "slow", "BILLING"),
            EvaluationItem::new("2", "fast", "CLAIMS"),
        ])
        .with_params(EvaluationParams::default().with_concurrency(2));

        let report = use_case.execute(input).await.unwrap();
        let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_empty_dataset_gives_zero_report() {
        let use_case =
            RunEvaluationUseCase::new(Arc::new(TableClassifier::new(vec![])), categories());
        let report = use_case.execute(RunEvaluationInput::new(vec![])).await.unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.metrics.total, 0);
        assert_eq!(report.metrics.overall_accuracy, 0.0);
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected() {
        let use_case =
            RunEvaluationUseCase::new(Arc::new(TableClassifier::new(vec![])), categories());
        let mut params = EvaluationParams::default();
        params.concurrency = 0;
        let err = use_case
            .execute(RunEvaluationInput::new(vec![]).with_params(params))
            .await
            .unwrap_err();
        assert_eq!(err, RunEvaluationError::InvalidConcurrency);
    }

    #[tokio::test]
    async fn test_end_to_end_with_consensus_classifier() {
        // Item 2's primary call fails; the rest classify normally.
        let gateway = Arc::new(ScriptedGateway::new(|prompt| {
            let (tag, input) = split_prompt(prompt);
            match (tag, input) {
                ("P", "charged twice") => Reply::text(r#"{"call_type": "BILLING"}"#),
                ("B", "charged twice") => Reply::text(r#"{"call_type": "BILLING"}"#),
                ("P", "broken") => Reply::Fail(GatewayError::RequestFailed("500".into())),
                ("P", _) => Reply::text(r#"{"call_type": null}"#),
                ("B", _) => Reply::text("no idea"),
                ("N", "charged twice") => Reply::text("yes"),
                _ => Reply::text("no"),
            }
        }));
        let logger = Arc::new(RecordingLogger::default());
        let config = test_config();
        let invoker = ModelInvoker::new(gateway, Model::default()).with_logger(logger.clone());
        let classifier = ConsensusClassifier::new(invoker, &config);
        let use_case = RunEvaluationUseCase::new(Arc::new(classifier), config.categories.clone())
            .with_logger(logger.clone());

        let report = use_case
            .execute(RunEvaluationInput::new(vec![
                EvaluationItem::new("1", "charged twice", "BILLING"),
                EvaluationItem::new("2", "broken", "RESTORE"),
                EvaluationItem::new("3", "hello", "CLAIMS"),
            ]))
            .await
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failures.len(), 1);

        let first = &report.results[0];
        assert_eq!(first.confidence, Some(ConfidenceTier::High));
        assert_eq!(first.debug.negative_check, Some(triage_domain::NegativeCheck::Classifiable));

        let third = &report.results[1];
        assert!(third.needs_human);
        assert_eq!(third.confidence, Some(ConfidenceTier::Low));

        assert_eq!(report.metrics.confidence_metrics.high.count, 1);
        assert_eq!(report.metrics.confidence_metrics.low.count, 1);
        assert_eq!(report.metrics.human_review.percentage, 0.5);

        let kinds: Vec<&str> = logger.events().iter().map(|e| e.event_type).collect();
        assert_eq!(kinds.iter().filter(|k| **k == "verdict").count(), 2);
        assert_eq!(kinds.iter().filter(|k| **k == "item_failed").count(), 1);
        assert!(kinds.iter().filter(|k| **k == "strategy_response").count() >= 6);
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = EvaluationReport {
            results: vec![ItemResult {
                id: "1".into(),
                customer_input: "bill".into(),
                actual_type: "BILLING".into(),
                call_type: Some("BILLING".into()),
                confidence: Some(ConfidenceTier::High),
                needs_human: false,
                correct: true,
                debug: ClassificationDebug::default(),
            }],
            metrics: triage_domain::metrics::aggregate(&[], &categories()),
            failures: vec![],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("failures").is_none());
        let row = &value["results"][0];
        assert_eq!(row["call_type"], "BILLING");
        assert_eq!(row["confidence"], "high");
        assert_eq!(row["actual_type"], "BILLING");
        assert!(row["debug"].get("primary_label").is_some());
        assert!(value["metrics"]["category_metrics"].get("CLAIMS").is_some());
    }

    #[test]
    fn test_recompute_metrics_from_rows() {
        let report = EvaluationReport {
            results: vec![ItemResult {
                id: "1".into(),
                customer_input: "bill".into(),
                actual_type: "BILLING".into(),
                call_type: None,
                confidence: None,
                needs_human: true,
                correct: false,
                debug: ClassificationDebug::default(),
            }],
            metrics: triage_domain::metrics::aggregate(&[], &categories()),
            failures: vec![],
        };
        let metrics = report.recompute_metrics(&categories());
        assert_eq!(metrics.total, 1);
        assert_eq!(metrics.confidence_metrics.unknown.count, 1);
        assert_eq!(metrics.human_review.count, 1);
    }
}
