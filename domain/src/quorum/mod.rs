//! Quorum consensus domain
//!
//! Three independent strategies give their opinion on one input; this module
//! decides what those opinions add up to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  raw responses                                                   │
//! │     │ primary        │ backup          │ negative               │
//! │     ▼                ▼                 ▼                         │
//! │  parse_opinion    parse_opinion    parse_negative_check          │
//! │     │                │                 │                         │
//! │  validate ───────────┼─────────────────┤                         │
//! │     │ (valid?)       │                 │                         │
//! │     ▼                ▼                 ▼                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  ConsensusEngine::decide  (join point, pure)               │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                          ▼                                       │
//! │                  Verdict + ConsensusRule                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod consensus;
pub mod parsing;
pub mod validator;

// Re-export main types
pub use consensus::{ConsensusDecision, ConsensusEngine, ConsensusRule};
pub use parsing::{parse_baseline, parse_negative_check, parse_opinion};
pub use validator::{SchemaValidator, validate};
