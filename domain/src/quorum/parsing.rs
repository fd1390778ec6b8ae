//! Response interpretation rules for the classification strategies.
//!
//! These functions turn a raw model response into an [`Opinion`] or a
//! [`NegativeCheck`]. They are pure: no I/O, just text handling. The model is
//! not guaranteed to follow formatting instructions, so every rule has a
//! defined fallback.
//!
//! # Functions
//!
//! | Function | Strategy | Rule |
//! |----------|----------|------|
//! | [`parse_opinion`] | Primary / Backup | strict JSON, else first category mentioned |
//! | [`parse_negative_check`] | Negative-Check | "yes" → classifiable, "no" → not, else classifiable |
//! | [`parse_baseline`] | Baseline | first category mentioned |

use crate::category::CategorySet;
use crate::classification::{NegativeCheck, Opinion};
use serde_json::Value;

/// Interpret a Primary/Backup response.
///
/// 1. **Strict**: the whole response (optionally inside one markdown code
///    fence) parses as JSON → [`Opinion::from_json`] with `label_field`.
/// 2. **Fallback**: otherwise, the first category (in set order) appearing
///    verbatim in the raw text becomes the label; none → no label.
///
/// A strict parse is taken at face value even when its label is unknown;
/// catching that is the schema validator's job.
///
/// # Examples
///
/// ```
/// use triage_domain::{CategorySet, quorum::parsing::parse_opinion};
///
/// let categories = CategorySet::new(["BILLING", "CLAIMS"]).unwrap();
///
/// let strict = parse_opinion(r#"{"call_type": "CLAIMS"}"#, &categories, "call_type");
/// assert_eq!(strict.label(), Some("CLAIMS"));
///
/// let fallback = parse_opinion("I'd say this is BILLING.", &categories, "call_type");
/// assert_eq!(fallback.label(), Some("BILLING"));
///
/// let nothing = parse_opinion("No idea.", &categories, "call_type");
/// assert_eq!(nothing.label(), None);
/// ```
pub fn parse_opinion(response: &str, categories: &CategorySet, label_field: &str) -> Opinion {
    if let Ok(value) = serde_json::from_str::<Value>(strip_code_fence(response)) {
        return Opinion::from_json(value, label_field);
    }

    match categories.first_mentioned_in(response) {
        Some(label) => Opinion::labeled(label),
        None => Opinion::unlabeled(),
    }
}

/// Interpret a Negative-Check response.
///
/// Lower-cases the response; "yes" anywhere → classifiable, else "no"
/// anywhere → not classifiable, else classifiable. Ambiguity fails open.
/// The test is a plain substring test, so "not sure" counts as "no".
pub fn parse_negative_check(response: &str) -> NegativeCheck {
    let answer = response.trim().to_lowercase();

    if answer.contains("yes") {
        NegativeCheck::Classifiable
    } else if answer.contains("no") {
        NegativeCheck::NotClassifiable
    } else {
        NegativeCheck::Classifiable
    }
}

/// Interpret a Baseline response: the first category mentioned, if any.
pub fn parse_baseline(response: &str, categories: &CategorySet) -> Option<String> {
    categories
        .first_mentioned_in(response.trim())
        .map(str::to_string)
}

/// Return the body of a response wrapped in a single ``` fence, or the
/// trimmed response itself.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string such as "json" on the opening line
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim_start().starts_with('{') => inner.trim(),
        _ => body.trim(),
    }
}
