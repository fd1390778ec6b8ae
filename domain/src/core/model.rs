//! Model value object representing the text-generation model

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models known to the classifier (Value Object)
///
/// The identifier is passed through to the collaborator untouched; unknown
/// identifiers become [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    ClaudeSonnet37,
    ClaudeSonnet35Latest,
    ClaudeSonnet45,
    ClaudeHaiku45,
    ClaudeOpus45,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet37 => "claude-3-7-sonnet-20250219",
            Model::ClaudeSonnet35Latest => "claude-3-5-sonnet-latest",
            Model::ClaudeSonnet45 => "claude-sonnet-4-5",
            Model::ClaudeHaiku45 => "claude-haiku-4-5",
            Model::ClaudeOpus45 => "claude-opus-4-5",
            Model::Custom(s) => s,
        }
    }

    /// Parse a model identifier, rejecting blank input
    pub fn parse_checked(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModel(
                "model identifier cannot be empty".to_string(),
            ));
        }
        Ok(match trimmed {
            "claude-3-7-sonnet-20250219" => Model::ClaudeSonnet37,
            "claude-3-5-sonnet-latest" => Model::ClaudeSonnet35Latest,
            "claude-sonnet-4-5" => Model::ClaudeSonnet45,
            "claude-haiku-4-5" => Model::ClaudeHaiku45,
            "claude-opus-4-5" => Model::ClaudeOpus45,
            other => Model::Custom(other.to_string()),
        })
    }

    /// Check if this is a Claude model
    pub fn is_claude(&self) -> bool {
        match self {
            Model::Custom(s) => s.starts_with("claude"),
            _ => true,
        }
    }
}

impl Default for Model {
    /// Returns the default classification model (Claude 3.7 Sonnet)
    fn default() -> Self {
        Model::ClaudeSonnet37
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::parse_checked(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
