//! Prompt domain
//!
//! Templates for the prompt each classification strategy sends.

mod template;

pub use template::{PromptSet, PromptTemplate};
