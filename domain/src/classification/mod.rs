//! Classification value objects
//!
//! - [`Opinion`](opinion::Opinion): one label-producing strategy's reading
//! - [`NegativeCheck`](negative::NegativeCheck): classifiable yes/no
//! - [`Verdict`](verdict::Verdict): the reconciled decision
//! - [`StrategyRole`](strategy::StrategyRole): which strategy produced what

pub mod negative;
pub mod opinion;
pub mod strategy;
pub mod verdict;

pub use negative::NegativeCheck;
pub use opinion::{Opinion, OpinionShape};
pub use strategy::StrategyRole;
pub use verdict::{ConfidenceTier, Verdict};
