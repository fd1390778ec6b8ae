//! Strategy roles

use serde::{Deserialize, Serialize};

/// The role a classification strategy plays
///
/// `Primary`, `Backup` and `NegativeCheck` feed the consensus engine.
/// `Baseline` is the single-pass classifier kept for comparison runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyRole {
    /// Direct extraction with format expectations
    Primary,
    /// Step-by-step reasoning before answering
    Backup,
    /// Yes/no: is the input classifiable at all
    #[serde(rename = "negative")]
    NegativeCheck,
    /// One call, category name only
    Baseline,
}

impl StrategyRole {
    /// All roles that take part in a consensus classification
    pub const CONSENSUS: [StrategyRole; 3] = [
        StrategyRole::Primary,
        StrategyRole::Backup,
        StrategyRole::NegativeCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyRole::Primary => "primary",
            StrategyRole::Backup => "backup",
            StrategyRole::NegativeCheck => "negative",
            StrategyRole::Baseline => "baseline",
        }
    }
}

impl std::fmt::Display for StrategyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StrategyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" => Ok(StrategyRole::Primary),
            "backup" => Ok(StrategyRole::Backup),
            "negative" | "negative_check" => Ok(StrategyRole::NegativeCheck),
            "baseline" => Ok(StrategyRole::Baseline),
            other => Err(format!(
                "Unknown strategy: {}. Valid: primary, backup, negative, baseline",
                other
            )),
        }
    }
}
