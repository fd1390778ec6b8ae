//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Only construction of domain values can fail. Combining, validating and
/// aggregating are total and never return these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Category set must contain at least one label")]
    EmptyCategorySet,

    #[error("Category label cannot be empty")]
    EmptyCategory,

    #[error("Duplicate category label: {0}")]
    DuplicateCategory(String),

    #[error("Invalid prompt template for {strategy}: {reason}")]
    InvalidTemplate { strategy: String, reason: String },

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl DomainError {
    /// Check if this error concerns the category set
    pub fn is_category_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyCategorySet
                | DomainError::EmptyCategory
                | DomainError::DuplicateCategory(_)
        )
    }
}
