//! Consensus Decision Engine
//!
//! Reconciles the Primary and Backup opinions and the Negative check into a
//! single [`Verdict`]. The policy is a fixed priority list; the first rule
//! that matches wins.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ 1. primary invalid        → backup label @ medium, else human review │
//! │ 2. negative = "no" and    → backup missing    → human review         │
//! │    primary has a label      backup agrees     → primary @ medium     │
//! │                             backup disagrees  → human review         │
//! │ 3. primary == backup      → primary @ high                           │
//! │ 4. primary has a label    → primary @ medium, else human review      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is pure and total: no I/O, no failure path.

use crate::classification::{ConfidenceTier, NegativeCheck, Opinion, Verdict};
use serde::{Deserialize, Serialize};

/// The policy branch that produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusRule {
    /// Rule 1: primary failed validation, backup supplied the label
    InvalidPrimaryBackupUsed,
    /// Rule 1: primary failed validation and backup had no label
    InvalidPrimaryNoBackup,
    /// Rule 2: negative check objects and backup offers no label
    NegativeCheckUnconfirmed,
    /// Rule 2: negative check objects but primary and backup agree
    NegativeCheckOverridden,
    /// Rule 2: negative check objects and backup names another label
    NegativeCheckDisagreement,
    /// Rule 3: primary and backup agree on a label
    Agreement,
    /// Rule 4: primary label stands alone
    PrimaryDefault,
    /// Rule 4: nobody produced a label
    NoLabel,
}

impl ConsensusRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusRule::InvalidPrimaryBackupUsed => "invalid_primary_backup_used",
            ConsensusRule::InvalidPrimaryNoBackup => "invalid_primary_no_backup",
            ConsensusRule::NegativeCheckUnconfirmed => "negative_check_unconfirmed",
            ConsensusRule::NegativeCheckOverridden => "negative_check_overridden",
            ConsensusRule::NegativeCheckDisagreement => "negative_check_disagreement",
            ConsensusRule::Agreement => "agreement",
            ConsensusRule::PrimaryDefault => "primary_default",
            ConsensusRule::NoLabel => "no_label",
        }
    }

    /// Priority position (1-4) of the rule in the policy
    pub fn priority(&self) -> u8 {
        match self {
            ConsensusRule::InvalidPrimaryBackupUsed | ConsensusRule::InvalidPrimaryNoBackup => 1,
            ConsensusRule::NegativeCheckUnconfirmed
            | ConsensusRule::NegativeCheckOverridden
            | ConsensusRule::NegativeCheckDisagreement => 2,
            ConsensusRule::Agreement => 3,
            ConsensusRule::PrimaryDefault | ConsensusRule::NoLabel => 4,
        }
    }
}

impl std::fmt::Display for ConsensusRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A verdict together with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusDecision {
    pub verdict: Verdict,
    pub rule: ConsensusRule,
}

impl ConsensusDecision {
    fn new(verdict: Verdict, rule: ConsensusRule) -> Self {
        Self { verdict, rule }
    }
}

/// Stateless consensus combiner
///
/// # Example
///
/// ```
/// use triage_domain::{ConfidenceTier, ConsensusEngine, NegativeCheck, Opinion};
///
/// let verdict = ConsensusEngine::combine(
///     &Opinion::labeled("BILLING"),
///     &Opinion::labeled("BILLING"),
///     NegativeCheck::Classifiable,
///     true,
/// );
/// assert_eq!(verdict.label(), Some("BILLING"));
/// assert_eq!(verdict.confidence(), Some(ConfidenceTier::High));
/// assert!(!verdict.needs_human());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusEngine;

impl ConsensusEngine {
    /// Combine three opinions into a verdict
    pub fn combine(
        primary: &Opinion,
        backup: &Opinion,
        negative: NegativeCheck,
        primary_is_valid: bool,
    ) -> Verdict {
        Self::decide(primary, backup, negative, primary_is_valid).verdict
    }

    /// Same as [`ConsensusEngine::combine`], also reporting the rule that fired
    pub fn decide(
        primary: &Opinion,
        backup: &Opinion,
        negative: NegativeCheck,
        primary_is_valid: bool,
    ) -> ConsensusDecision {
        // Rule 1: only the backup's label is consulted
        if !primary_is_valid {
            return match backup.label() {
                Some(label) => ConsensusDecision::new(
                    Verdict::labeled(label, ConfidenceTier::Medium),
                    ConsensusRule::InvalidPrimaryBackupUsed,
                ),
                None => ConsensusDecision::new(
                    Verdict::needs_review(),
                    ConsensusRule::InvalidPrimaryNoBackup,
                ),
            };
        }

        // Rule 2
        if negative == NegativeCheck::NotClassifiable
            && let Some(primary_label) = primary.label()
        {
            return match backup.label() {
                None => ConsensusDecision::new(
                    Verdict::needs_review(),
                    ConsensusRule::NegativeCheckUnconfirmed,
                ),
                Some(backup_label) if backup_label == primary_label => ConsensusDecision::new(
                    Verdict::labeled(primary_label, ConfidenceTier::Medium),
                    ConsensusRule::NegativeCheckOverridden,
                ),
                Some(_) => ConsensusDecision::new(
                    Verdict::needs_review(),
                    ConsensusRule::NegativeCheckDisagreement,
                ),
            };
        }

        match (primary.label(), backup.label()) {
            // Rule 3
            (Some(p), Some(b)) if p == b => ConsensusDecision::new(
                Verdict::labeled(p, ConfidenceTier::High),
                ConsensusRule::Agreement,
            ),
            // Rule 4
            (Some(p), _) => ConsensusDecision::new(
                Verdict::labeled(p, ConfidenceTier::Medium),
                ConsensusRule::PrimaryDefault,
            ),
            (None, _) => ConsensusDecision::new(Verdict::needs_review(), ConsensusRule::NoLabel),
        }
    }
}
