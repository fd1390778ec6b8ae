//! Configuration issues reported while loading settings.
//!
//! Loaders collect every problem they find instead of stopping at the first
//! one. The caller decides what to do: [`Severity::Error`] aborts startup,
//! [`Severity::Warning`] is logged and the run continues.
//!
//! # Examples
//!
//! ```
//! use triage_domain::config::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issue = ConfigIssue::error(ConfigIssueCode::EmptyCategories, "no categories configured");
//! assert!(issue.is_error());
//! assert_eq!(issue.to_string(), "error: no categories configured");
//! ```

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// The category set is empty.
    EmptyCategories,
    /// A category is blank or listed twice.
    InvalidCategory,
    /// The model name is blank.
    InvalidModel,
    /// The label field name is blank.
    EmptyLabelField,
    /// A prompt template does not render.
    InvalidPromptTemplate,
    /// A prompt template is keyed by an unknown strategy name.
    UnknownPromptTemplate,
    /// Timeout or concurrency is zero.
    InvalidEvaluationSetting,
    /// No API key and no environment variable holding one.
    MissingApiKey,
    /// Base URL is not http(s).
    InvalidBaseUrl,
    /// Model name not recognised as a Claude model; it is passed through as-is.
    UnrecognizedModel,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.as_str(), self.message)
    }
}
