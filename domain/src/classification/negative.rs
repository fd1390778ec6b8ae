//! Negative check: is the input classifiable at all?

use serde::{Deserialize, Serialize};

/// Outcome of the Negative-Check strategy
///
/// Serialized as `"yes"` / `"no"`, the answers the strategy asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NegativeCheck {
    /// The input carries enough information to pick a category
    #[default]
    #[serde(rename = "yes")]
    Classifiable,
    /// The input does not carry enough information
    #[serde(rename = "no")]
    NotClassifiable,
}

impl NegativeCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            NegativeCheck::Classifiable => "yes",
            NegativeCheck::NotClassifiable => "no",
        }
    }

    pub fn is_classifiable(&self) -> bool {
        matches!(self, NegativeCheck::Classifiable)
    }
}

impl std::fmt::Display for NegativeCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
