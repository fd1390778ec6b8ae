//! Metrics Aggregator
//!
//! Reduces a batch of [`EvaluationRecord`]s into a [`MetricsReport`]. Pure and
//! total: an empty batch yields an all-zero report, and every quotient with a
//! zero denominator is 0 rather than NaN.

use super::report::{
    CategoryMetrics, ConfidenceMetrics, HumanReviewMetrics, MetricsReport, TierBucket,
};
use crate::category::CategorySet;
use crate::classification::Verdict;
use serde::{Deserialize, Serialize};

/// One classified input paired with its ground truth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub input_text: String,
    pub ground_truth: String,
    pub verdict: Verdict,
}

impl EvaluationRecord {
    pub fn new(input_text: impl Into<String>, ground_truth: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            input_text: input_text.into(),
            ground_truth: ground_truth.into(),
            verdict,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.verdict.matches(&self.ground_truth)
    }
}

/// Aggregator bound to one category set
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    categories: CategorySet,
}

impl MetricsAggregator {
    pub fn new(categories: CategorySet) -> Self {
        Self { categories }
    }

    pub fn aggregate(&self, records: &[EvaluationRecord]) -> MetricsReport {
        aggregate(records, &self.categories)
    }
}

/// Compute the metrics report for `records`
///
/// Per-category metrics are one-vs-rest: every record is scored against
/// every category independently.
pub fn aggregate(records: &[EvaluationRecord], categories: &CategorySet) -> MetricsReport {
    let total = records.len();
    let correct = records.iter().filter(|r| r.is_correct()).count();

    let category_metrics = categories
        .iter()
        .map(|category| (category.to_string(), category_metrics(records, category)))
        .collect();

    let mut confidence_metrics = ConfidenceMetrics::default();
    for record in records {
        let bucket = confidence_metrics.get_mut(TierBucket::from(record.verdict.confidence()));
        bucket.count += 1;
        if record.is_correct() {
            bucket.correct += 1;
        }
    }
    for bucket in TierBucket::ALL {
        let tier = confidence_metrics.get_mut(bucket);
        tier.accuracy = ratio(tier.correct, tier.count);
    }

    let needs_human = records.iter().filter(|r| r.verdict.needs_human()).count();

    MetricsReport {
        overall_accuracy: ratio(correct, total),
        correct,
        total,
        category_metrics,
        confidence_metrics,
        human_review: HumanReviewMetrics {
            count: needs_human,
            percentage: ratio(needs_human, total),
        },
    }
}

fn category_metrics(records: &[EvaluationRecord], category: &str) -> CategoryMetrics {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;

    for record in records {
        let actual = record.ground_truth == category;
        let predicted = record.verdict.label() == Some(category);
        match (actual, predicted) {
            (true, true) => tp += 1,
            (true, false) => fn_ += 1,
            (false, true) => fp += 1,
            (false, false) => {}
        }
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    CategoryMetrics {
        precision,
        recall,
        f1,
        count: tp + fn_,
        predicted: tp + fp,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ConfidenceTier;

    fn categories() -> CategorySet {
        CategorySet::new(["BILLING", "CLAIMS", "RESTORE"]).unwrap()
    }

    fn rec(truth: &str, verdict: Verdict) -> EvaluationRecord {
        EvaluationRecord::new("input", truth, verdict)
    }

    fn high(label: &str) -> Verdict {
        Verdict::labeled(label, ConfidenceTier::High)
    }

    fn medium(label: &str) -> Verdict {
        Verdict::labeled(label, ConfidenceTier::Medium)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_batch_is_all_zero() {
        let report = aggregate(&[], &categories());
        assert_eq!(report.total, 0);
        assert_eq!(report.overall_accuracy, 0.0);
        assert_eq!(report.category_metrics.len(), 3);
        for (_, m) in &report.category_metrics {
            assert_eq!(*m, CategoryMetrics::default());
        }
        for (_, t) in report.confidence_metrics.iter() {
            assert_eq!(t.accuracy, 0.0);
        }
        assert_eq!(report.human_review.percentage, 0.0);
        assert!(!report.overall_accuracy.is_nan());
    }

    #[test]
    fn test_ten_record_batch() {
        // 10 records, 6 correct. BILLING: 3 in ground truth, 2 hit, 1 predicted as CLAIMS.
        // One RESTORE record is also (wrongly) predicted as BILLING.
        let records = vec![
            rec("BILLING", high("BILLING")),
            rec("BILLING", medium("BILLING")),
            rec("BILLING", medium("CLAIMS")),
            rec("CLAIMS", high("CLAIMS")),
            rec("CLAIMS", high("CLAIMS")),
            rec("CLAIMS", Verdict::needs_review()),
            rec("RESTORE", high("RESTORE")),
            rec("RESTORE", medium("BILLING")),
            rec("RESTORE", Verdict::needs_review()),
            rec("RESTORE", high("RESTORE")),
        ];

        let report = aggregate(&records, &categories());
        assert_eq!(report.total, 10);
        assert_eq!(report.correct, 6);
        assert!(close(report.overall_accuracy, 0.6));

        let billing = report.category("BILLING").unwrap();
        assert_eq!(billing.count, 3);
        assert_eq!(billing.predicted, 3);
        assert!(close(billing.recall, 2.0 / 3.0));
        assert!(close(billing.precision, 2.0 / 3.0));
        assert!(close(billing.f1, 2.0 / 3.0));

        let claims = report.category("CLAIMS").unwrap();
        assert_eq!(claims.count, 3);
        assert!(close(claims.precision, 2.0 / 3.0));
        assert!(close(claims.recall, 2.0 / 3.0));

        let restore = report.category("RESTORE").unwrap();
        assert!(close(restore.precision, 1.0));
        assert!(close(restore.recall, 0.5));
        assert!(close(restore.f1, 2.0 / 3.0));

        let high_tier = report.confidence_metrics.high;
        assert_eq!(high_tier.count, 5);
        assert_eq!(high_tier.correct, 5);
        assert!(close(high_tier.accuracy, 1.0));

        let medium_tier = report.confidence_metrics.medium;
        assert_eq!(medium_tier.count, 3);
        assert_eq!(medium_tier.correct, 1);

        let low_tier = report.confidence_metrics.low;
        assert_eq!(low_tier.count, 2);
        assert_eq!(low_tier.accuracy, 0.0);

        assert_eq!(report.human_review.count, 2);
        assert!(close(report.human_review.percentage, 0.2));
    }

    #[test]
    fn test_unrated_verdicts_land_in_unknown() {
        let records = vec![
            rec("BILLING", Verdict::unrated(Some("BILLING".to_string()))),
            rec("CLAIMS", Verdict::unrated(None)),
        ];
        let report = aggregate(&records, &categories());
        assert_eq!(report.confidence_metrics.unknown.count, 2);
        assert_eq!(report.confidence_metrics.unknown.correct, 1);
        assert!(close(report.confidence_metrics.unknown.accuracy, 0.5));
        assert_eq!(report.human_review.count, 1);
    }

    #[test]
    fn test_never_predicted_category_has_zero_precision() {
        let records = vec![rec("CLAIMS", high("BILLING"))];
        let report = aggregate(&records, &categories());
        let claims = report.category("CLAIMS").unwrap();
        assert_eq!(claims.precision, 0.0);
        assert_eq!(claims.recall, 0.0);
        assert_eq!(claims.f1, 0.0);
        assert_eq!(claims.count, 1);
    }

    #[test]
    fn test_ground_truth_outside_set_only_counts_overall() {
        let records = vec![rec("COMPOST", Verdict::needs_review())];
        let report = aggregate(&records, &categories());
        assert_eq!(report.total, 1);
        assert!(report.category_metrics.iter().all(|(_, m)| m.count == 0));
    }

    #[test]
    fn test_aggregator_struct_matches_free_fn() {
        let records = vec![rec("BILLING", high("BILLING"))];
        let agg = MetricsAggregator::new(categories());
        assert_eq!(agg.aggregate(&records), aggregate(&records, &categories()));
    }
}
