//! Verdict: the reconciled decision for one input

use serde::{Deserialize, Serialize};

/// Categorical confidence in a verdict's label
///
/// Reflects how many independent strategies corroborated the label, not a
/// model-reported probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConfidenceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(ConfidenceTier::High),
            "medium" => Ok(ConfidenceTier::Medium),
            "low" => Ok(ConfidenceTier::Low),
            other => Err(format!(
                "Unknown confidence tier: {}. Valid: high, medium, low",
                other
            )),
        }
    }
}

/// Final decision for one input
///
/// Constructors uphold `needs_human == label.is_none()`. The only exception
/// is [`Verdict::from_parts`], which restores verdicts read back from a
/// previously written report exactly as they were stored.
///
/// # Example
///
/// ```
/// use triage_domain::{ConfidenceTier, Verdict};
///
/// let verdict = Verdict::labeled("BILLING", ConfidenceTier::High);
/// assert!(!verdict.needs_human());
///
/// let review = Verdict::needs_review();
/// assert_eq!(review.label(), None);
/// assert!(review.needs_human());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    label: Option<String>,
    confidence: Option<ConfidenceTier>,
    needs_human: bool,
}

impl Verdict {
    /// A usable label at the given confidence
    pub fn labeled(label: impl Into<String>, confidence: ConfidenceTier) -> Self {
        Self {
            label: Some(label.into()),
            confidence: Some(confidence),
            needs_human: false,
        }
    }

    /// No usable label; route to manual review
    pub fn needs_review() -> Self {
        Self {
            label: None,
            confidence: Some(ConfidenceTier::Low),
            needs_human: true,
        }
    }

    /// A verdict from a strategy that reports no confidence tier
    pub fn unrated(label: Option<String>) -> Self {
        let needs_human = label.is_none();
        Self {
            label,
            confidence: None,
            needs_human,
        }
    }

    /// Restore a verdict exactly as stored in a report
    pub fn from_parts(
        label: Option<String>,
        confidence: Option<ConfidenceTier>,
        needs_human: bool,
    ) -> Self {
        Self {
            label,
            confidence,
            needs_human,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// `None` when the producing strategy reports no tier
    pub fn confidence(&self) -> Option<ConfidenceTier> {
        self.confidence
    }

    pub fn needs_human(&self) -> bool {
        self.needs_human
    }

    /// Whether the verdict's label equals the ground truth
    pub fn matches(&self, ground_truth: &str) -> bool {
        self.label.as_deref() == Some(ground_truth)
    }
}
