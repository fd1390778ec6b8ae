//! Schema Validator
//!
//! Checks a single [`Opinion`] against the category set. A failed check is
//! an ordinary outcome consumed by the consensus policy, never an error.

use crate::category::CategorySet;
use crate::classification::Opinion;

/// Validates opinions against one category set
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    categories: CategorySet,
}

impl SchemaValidator {
    pub fn new(categories: CategorySet) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// True iff the opinion is well-formed and its label is null or known
    pub fn validate(&self, opinion: &Opinion) -> bool {
        validate(opinion, &self.categories)
    }
}

/// True iff `opinion` is well-formed and its label is `None` or a member of
/// `categories`
pub fn validate(opinion: &Opinion, categories: &CategorySet) -> bool {
    if !opinion.is_well_formed() {
        return false;
    }
    match opinion.label() {
        None => true,
        Some(label) => categories.contains(label),
    }
}
