//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use triage_domain::{ConfigIssue, ConfigIssueCode};

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 1024,
            api_version: "2023-06-01".to_string(),
            timeout_seconds: 120,
        }
    }
}

impl FileAnthropicConfig {
    /// The API key from `api_key`, else from the `api_key_env` variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| lookup(&self.api_key_env).filter(|k| !k.trim().is_empty()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidBaseUrl,
                format!(
                    "providers.anthropic.base_url: '{}' is not an http(s) URL",
                    self.base_url
                ),
            ));
        }
        if self.max_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEvaluationSetting,
                "providers.anthropic.max_tokens cannot be 0",
            ));
        }
        issues
    }

    /// Issue reported when no key can be found
    pub fn missing_key_issue(&self) -> ConfigIssue {
        ConfigIssue::error(
            ConfigIssueCode::MissingApiKey,
            format!(
                "Anthropic API key not found: set {} or providers.anthropic.api_key",
                self.api_key_env
            ),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileAnthropicConfig::default();
        assert_eq!(config.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.api_version, "2023-06-01");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_direct_key_wins_over_env() {
        let config = FileAnthropicConfig {
            api_key: Some("sk-direct".into()),
            ..Default::default()
        };
        let key = config.resolve_api_key_with(|_| Some("sk-env".into()));
        assert_eq!(key.as_deref(), Some("sk-direct"));
    }

    #[test]
    fn test_env_key_used_when_direct_missing_or_blank() {
        let config = FileAnthropicConfig {
            api_key: Some("   ".into()),
            api_key_env: "MY_KEY".into(),
            ..Default::default()
        };
        let key = config.resolve_api_key_with(|name| {
            assert_eq!(name, "MY_KEY");
            Some("sk-env".into())
        });
        assert_eq!(key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_no_key_anywhere() {
        let config = FileAnthropicConfig::default();
        assert_eq!(config.resolve_api_key_with(|_| None), None);
        assert_eq!(config.resolve_api_key_with(|_| Some(String::new())), None);
        assert!(config.missing_key_issue().message.contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_bad_base_url() {
        let config = FileAnthropicConfig {
            base_url: "api.anthropic.com".into(),
            ..Default::default()
        };
        assert_eq!(config.validate()[0].code, ConfigIssueCode::InvalidBaseUrl);
    }
}
