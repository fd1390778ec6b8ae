//! Use cases (application services)
//!
//! - [`classify`]: one input to one verdict (consensus or baseline)
//! - [`run_evaluation`]: a labeled dataset to a scored report

pub mod classify;
pub mod run_evaluation;
