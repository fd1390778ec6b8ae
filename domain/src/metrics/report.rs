//! Metrics report types
//!
//! Field names follow the evaluation report format consumed downstream
//! (`overall_accuracy`, `category_metrics`, `confidence_metrics`,
//! `human_review`).

use crate::classification::ConfidenceTier;
use serde::{Deserialize, Serialize};

/// One-vs-rest statistics for a single category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Ground-truth occurrences (TP + FN)
    pub count: usize,
    /// Times the category was predicted (TP + FP)
    #[serde(default)]
    pub predicted: usize,
}

/// Confidence bucket a verdict falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierBucket {
    High,
    Medium,
    Low,
    /// Verdicts that carry no tier
    Unknown,
}

impl TierBucket {
    pub const ALL: [TierBucket; 4] = [
        TierBucket::High,
        TierBucket::Medium,
        TierBucket::Low,
        TierBucket::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TierBucket::High => "high",
            TierBucket::Medium => "medium",
            TierBucket::Low => "low",
            TierBucket::Unknown => "unknown",
        }
    }
}

impl From<Option<ConfidenceTier>> for TierBucket {
    fn from(tier: Option<ConfidenceTier>) -> Self {
        match tier {
            Some(ConfidenceTier::High) => TierBucket::High,
            Some(ConfidenceTier::Medium) => TierBucket::Medium,
            Some(ConfidenceTier::Low) => TierBucket::Low,
            None => TierBucket::Unknown,
        }
    }
}

/// Count and accuracy within one confidence bucket
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierMetrics {
    pub count: usize,
    pub correct: usize,
    pub accuracy: f64,
}

/// Per-bucket statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfidenceMetrics {
    pub high: TierMetrics,
    pub medium: TierMetrics,
    pub low: TierMetrics,
    pub unknown: TierMetrics,
}

impl ConfidenceMetrics {
    pub fn get(&self, bucket: TierBucket) -> &TierMetrics {
        match bucket {
            TierBucket::High => &self.high,
            TierBucket::Medium => &self.medium,
            TierBucket::Low => &self.low,
            TierBucket::Unknown => &self.unknown,
        }
    }

    pub(crate) fn get_mut(&mut self, bucket: TierBucket) -> &mut TierMetrics {
        match bucket {
            TierBucket::High => &mut self.high,
            TierBucket::Medium => &mut self.medium,
            TierBucket::Low => &mut self.low,
            TierBucket::Unknown => &mut self.unknown,
        }
    }

    /// Buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = (TierBucket, &TierMetrics)> {
        TierBucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }
}

/// Human-review routing statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HumanReviewMetrics {
    pub count: usize,
    /// Fraction of records (0.0 to 1.0), despite the name
    pub percentage: f64,
}

/// Aggregate snapshot over one batch of evaluation records
///
/// Computed fresh from a batch; never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub overall_accuracy: f64,
    pub correct: usize,
    pub total: usize,
    /// Per-category metrics in category-set order
    #[serde(with = "ordered_categories")]
    pub category_metrics: Vec<(String, CategoryMetrics)>,
    pub confidence_metrics: ConfidenceMetrics,
    pub human_review: HumanReviewMetrics,
}

impl MetricsReport {
    /// Look up one category's metrics
    pub fn category(&self, name: &str) -> Option<&CategoryMetrics> {
        self.category_metrics
            .iter()
            .find(|(c, _)| c == name)
            .map(|(_, m)| m)
    }

    /// Macro-averaged F1 over categories that occur in the ground truth
    pub fn macro_f1(&self) -> f64 {
        let present: Vec<f64> = self
            .category_metrics
            .iter()
            .filter(|(_, m)| m.count > 0)
            .map(|(_, m)| m.f1)
            .collect();
        if present.is_empty() {
            0.0
        } else {
            present.iter().sum::<f64>() / present.len() as f64
        }
    }

    /// Compare two reports ignoring category order
    ///
    /// Ratios may differ by up to `tolerance`; counts must match exactly.
    pub fn approx_eq(&self, other: &MetricsReport, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;
        let tiers_match = TierBucket::ALL.into_iter().all(|b| {
            let (x, y) = (self.confidence_metrics.get(b), other.confidence_metrics.get(b));
            x.count == y.count && x.correct == y.correct && close(x.accuracy, y.accuracy)
        });

        self.correct == other.correct
            && self.total == other.total
            && close(self.overall_accuracy, other.overall_accuracy)
            && self.human_review.count == other.human_review.count
            && close(self.human_review.percentage, other.human_review.percentage)
            && tiers_match
            && self.category_metrics.len() == other.category_metrics.len()
            && self.category_metrics.iter().all(|(name, m)| {
                other.category(name).is_some_and(|o| {
                    m.count == o.count
                        && m.predicted == o.predicted
                        && close(m.precision, o.precision)
                        && close(m.recall, o.recall)
                        && close(m.f1, o.f1)
                })
            })
    }
}

/// Serialize `Vec<(String, CategoryMetrics)>` as a JSON object whose keys
/// keep the category-set order.
mod ordered_categories {
    use super::CategoryMetrics;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &[(String, CategoryMetrics)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(value.iter().map(|(k, v)| (k, v)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, CategoryMetrics)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(InOrder)
    }

    struct InOrder;

    impl<'de> Visitor<'de> for InOrder {
        type Value = Vec<(String, CategoryMetrics)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of category name to metrics")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, metrics)) = access.next_entry::<String, CategoryMetrics>()? {
                entries.push((name, metrics));
            }
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_from_tier() {
        assert_eq!(TierBucket::from(Some(ConfidenceTier::High)), TierBucket::High);
        assert_eq!(TierBucket::from(None), TierBucket::Unknown);
    }

    #[test]
    fn test_category_map_keeps_order() {
        let report = MetricsReport {
            overall_accuracy: 0.0,
            correct: 0,
            total: 0,
            category_metrics: vec![
                ("RESTORE".to_string(), CategoryMetrics::default()),
                ("ABATEMENT".to_string(), CategoryMetrics::default()),
            ],
            confidence_metrics: ConfidenceMetrics::default(),
            human_review: HumanReviewMetrics::default(),
        };
        let json = serde_json::to_string(&report).unwrap();
        let restore = json.find("RESTORE").unwrap();
        let abatement = json.find("ABATEMENT").unwrap();
        assert!(restore < abatement);
        assert!(json.contains("\"unknown\":{\"count\":0"));
    }

    #[test]
    fn test_macro_f1_ignores_absent_categories() {
        let report = MetricsReport {
            overall_accuracy: 0.0,
            correct: 0,
            total: 0,
            category_metrics: vec![
                (
                    "A".to_string(),
                    CategoryMetrics {
                        f1: 1.0,
                        count: 2,
                        ..Default::default()
                    },
                ),
                ("B".to_string(), CategoryMetrics::default()),
            ],
            confidence_metrics: ConfidenceMetrics::default(),
            human_review: HumanReviewMetrics::default(),
        };
        assert_eq!(report.macro_f1(), 1.0);
    }

    fn two_thirds_report(order: [&str; 2]) -> MetricsReport {
        let metrics = |name: &str| {
            if name == "RESTORE" {
                CategoryMetrics {
                    precision: 2.0 / 3.0,
                    recall: 1.0,
                    f1: 0.8,
                    count: 2,
                    predicted: 3,
                }
            } else {
                CategoryMetrics {
                    precision: 1.0,
                    recall: 1.0 / 3.0,
                    f1: 0.5,
                    count: 3,
                    predicted: 1,
                }
            }
        };
        MetricsReport {
            overall_accuracy: 3.0 / 5.0,
            correct: 3,
            total: 5,
            category_metrics: order
                .iter()
                .map(|name| (name.to_string(), metrics(name)))
                .collect(),
            confidence_metrics: ConfidenceMetrics::default(),
            human_review: HumanReviewMetrics {
                count: 1,
                percentage: 1.0 / 5.0,
            },
        }
    }

    #[test]
    fn test_category_map_round_trip_keeps_document_order() {
        let report = two_thirds_report(["RESTORE", "BILLING"]);
        let json = serde_json::to_string(&report).unwrap();
        let loaded: MetricsReport = serde_json::from_str(&json).unwrap();

        let names: Vec<&str> = loaded.category_metrics.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["RESTORE", "BILLING"]);
        assert!(loaded.approx_eq(&report, 1e-9));
    }

    #[test]
    fn test_approx_eq_ignores_order_and_rounding() {
        let report = two_thirds_report(["RESTORE", "BILLING"]);
        let mut other = two_thirds_report(["BILLING", "RESTORE"]);
        other.category_metrics[1].1.precision += f64::EPSILON;
        assert!(report.approx_eq(&other, 1e-9));

        other.category_metrics[0].1.predicted = 2;
        assert!(!report.approx_eq(&other, 1e-9));
    }

    #[test]
    fn test_approx_eq_requires_same_categories() {
        let report = two_thirds_report(["RESTORE", "BILLING"]);
        let mut other = report.clone();
        other.category_metrics[1].0 = "CLAIMS".to_string();
        assert!(!report.approx_eq(&other, 1e-9));
    }
}
