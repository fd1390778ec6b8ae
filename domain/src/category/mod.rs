//! Category Set: the closed classification vocabulary
//!
//! Every validating, combining and aggregating operation is parameterized by
//! one [`CategorySet`]. Clones share the same backing storage, so handing the
//! set to each component never lets their copies diverge.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Immutable, ordered, non-empty list of unique labels
///
/// # Example
///
/// ```
/// use triage_domain::CategorySet;
///
/// let categories = CategorySet::new(["BILLING", "CLAIMS", "RESTORE"]).unwrap();
/// assert!(categories.contains("CLAIMS"));
/// assert!(!categories.contains("claims"));
/// assert_eq!(categories.joined(), "BILLING, CLAIMS, RESTORE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    labels: Arc<[String]>,
}

impl CategorySet {
    /// Build a category set, rejecting empty sets, blank labels and duplicates
    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(DomainError::EmptyCategorySet);
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if label.trim().is_empty() {
                return Err(DomainError::EmptyCategory);
            }
            if !seen.insert(label.as_str()) {
                return Err(DomainError::DuplicateCategory(label.clone()));
            }
        }

        Ok(Self {
            labels: labels.into(),
        })
    }

    /// Exact (case-sensitive) membership test
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Labels in their configured order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Comma-separated labels, as substituted into `{categories}`
    pub fn joined(&self) -> String {
        self.labels.join(", ")
    }

    /// First label (in set order) that occurs verbatim inside `text`
    ///
    /// Used as the fallback interpretation when a response is not valid
    /// structured output. Order matters: with `["CEMENT", "CEMENT REPAIR"]`
    /// a text mentioning "CEMENT REPAIR" resolves to `CEMENT`.
    pub fn first_mentioned_in(&self, text: &str) -> Option<&str> {
        self.iter().find(|label| text.contains(label))
    }
}

impl TryFrom<Vec<String>> for CategorySet {
    type Error = DomainError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.labels.to_vec()
    }
}
